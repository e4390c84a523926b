//! # Pagination Service
//!
//! Composes conditional filters, conditional sorts and an offset/limit slice
//! onto a deferred query and returns a [`Page`].
//!
//! Every operation comes in a blocking form for [`Execute`] sources and an
//! `_async` form for [`ExecuteAsync`] sources. Both behave identically; the
//! async form only yields while the engine counts and while it fetches.
//!
//! ## Order of operations
//!
//! 1. enabled filters restrict the query (logical AND)
//! 2. enabled sorts order it, primary key first
//! 3. the matching records are counted
//! 4. `page_size` records are fetched from `(page_number - 1) * page_size`
//! 5. `page_count = ceil(record_count / page_size)`
//!
//! The query must be totally ordered, either by the caller or through
//! [`Sorts`], otherwise page boundaries are not stable between calls.
//!
//! Counting and fetching are two separate evaluations of the query. Nothing
//! here isolates them from each other: if the data changes in between,
//! `record_count` and `results` can disagree.

use crate::errors::PaginateError;
use crate::filter::{Filters, apply_filters};
use crate::page::{Page, page_offset};
use crate::query::{Execute, ExecuteAsync, Queryable};
use crate::sort::{Sorts, apply_sorts};

/// Largest offset or page size accepted. SQL engines bind `OFFSET` and
/// `LIMIT` as signed 64-bit integers.
pub const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

/// Validates the arguments and returns the offset of the requested page.
fn checked_offset<E>(page_number: u64, page_size: u64) -> Result<u64, PaginateError<E>> {
    if page_number == 0 {
        tracing::warn!(page_number, page_size, "Rejected page number");
        return Err(PaginateError::InvalidPageNumber(page_number));
    }
    if page_size == 0 {
        tracing::warn!(page_number, page_size, "Rejected page size");
        return Err(PaginateError::InvalidPageSize(page_size));
    }
    page_offset(page_number, page_size)
        .filter(|&offset| offset <= MAX_OFFSET && page_size <= MAX_OFFSET)
        .ok_or_else(|| {
            tracing::warn!(page_number, page_size, "Page offset out of range");
            PaginateError::OffsetOverflow {
                page_number,
                page_size,
            }
        })
}

fn assemble<T>(page_number: u64, page_size: u64, record_count: u64, results: Vec<T>) -> Page<T> {
    let page = Page::new(page_number, page_size, record_count, results);
    tracing::debug!(
        page_number,
        page_size,
        offset = page.offset(),
        record_count,
        page_count = page.page_count(),
        returned = page.results().len(),
        "Paginated query"
    );
    page
}

/// Paginates an already ordered query.
///
/// # Errors
///
/// - [`PaginateError::InvalidPageNumber`] when `page_number` is 0
/// - [`PaginateError::InvalidPageSize`] when `page_size` is 0
/// - [`PaginateError::OffsetOverflow`] when the offset does not fit a `u64`
/// - [`PaginateError::Query`] with the engine's error when counting or fetching fails
pub fn paginate<Q: Execute>(
    query: Q,
    page_number: u64,
    page_size: u64,
) -> Result<Page<Q::Item>, PaginateError<Q::Error>> {
    let offset = checked_offset(page_number, page_size)?;
    let record_count = query.clone().count().map_err(PaginateError::Query)?;
    let results = query
        .fetch(offset, page_size)
        .map_err(PaginateError::Query)?;
    Ok(assemble(page_number, page_size, record_count, results))
}

/// Orders the query by the enabled `sorts`, then paginates it.
///
/// # Errors
///
/// See [`paginate`].
pub fn paginate_sorted<Q: Execute>(
    query: Q,
    page_number: u64,
    page_size: u64,
    sorts: &Sorts<Q>,
) -> Result<Page<Q::Item>, PaginateError<Q::Error>> {
    paginate(apply_sorts(query, sorts), page_number, page_size)
}

/// Restricts the query by the enabled `filters`, orders it by the enabled
/// `sorts`, then paginates it.
///
/// `filters` is consumed because each predicate moves into the query.
/// Sort keys are only read, so one `Sorts` can serve many calls.
///
/// # Errors
///
/// See [`paginate`].
pub fn paginate_filtered<Q: Execute>(
    query: Q,
    page_number: u64,
    page_size: u64,
    sorts: &Sorts<Q>,
    filters: Filters<Q>,
) -> Result<Page<Q::Item>, PaginateError<Q::Error>> {
    paginate_sorted(apply_filters(query, filters), page_number, page_size, sorts)
}

/// Async form of [`paginate`].
///
/// # Errors
///
/// See [`paginate`].
pub async fn paginate_async<Q: ExecuteAsync>(
    query: Q,
    page_number: u64,
    page_size: u64,
) -> Result<Page<Q::Item>, PaginateError<Q::Error>> {
    let offset = checked_offset(page_number, page_size)?;
    let record_count = query
        .clone()
        .count_async()
        .await
        .map_err(PaginateError::Query)?;
    let results = query
        .fetch_async(offset, page_size)
        .await
        .map_err(PaginateError::Query)?;
    Ok(assemble(page_number, page_size, record_count, results))
}

/// Async form of [`paginate_sorted`].
///
/// # Errors
///
/// See [`paginate`].
pub async fn paginate_sorted_async<Q: ExecuteAsync>(
    query: Q,
    page_number: u64,
    page_size: u64,
    sorts: &Sorts<Q>,
) -> Result<Page<Q::Item>, PaginateError<Q::Error>> {
    paginate_async(apply_sorts(query, sorts), page_number, page_size).await
}

/// Async form of [`paginate_filtered`]. Consumes `filters` the same way.
///
/// # Errors
///
/// See [`paginate`].
pub async fn paginate_filtered_async<Q: ExecuteAsync>(
    query: Q,
    page_number: u64,
    page_size: u64,
    sorts: &Sorts<Q>,
    filters: Filters<Q>,
) -> Result<Page<Q::Item>, PaginateError<Q::Error>> {
    let query = apply_filters(query, filters);
    paginate_sorted_async(query, page_number, page_size, sorts).await
}

/// Applies filters then sorts without executing anything.
///
/// Useful when the composed query is needed for something other than a page,
/// such as an export of every matching record.
pub fn compose<Q: Queryable>(query: Q, sorts: &Sorts<Q>, filters: Filters<Q>) -> Q {
    apply_sorts(apply_filters(query, filters), sorts)
}
