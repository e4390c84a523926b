use serde::{Deserialize, Serialize};

/// One page of results together with the totals of the whole query.
///
/// `record_count` counts every record matching the query, not only the ones
/// on this page. Built once per pagination call and read-only afterwards.
///
/// Deserializing goes through [`Page::new`], so `page_count` is always derived
/// from the other fields and a sent `page_count` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PageFields<T>")]
pub struct Page<T> {
    current_page: u64,
    page_size: u64,
    record_count: u64,
    page_count: u64,
    results: Vec<T>,
}

#[derive(Deserialize)]
struct PageFields<T> {
    current_page: u64,
    page_size: u64,
    record_count: u64,
    results: Vec<T>,
}

impl<T> From<PageFields<T>> for Page<T> {
    fn from(fields: PageFields<T>) -> Self {
        Self::new(
            fields.current_page,
            fields.page_size,
            fields.record_count,
            fields.results,
        )
    }
}

impl<T> Page<T> {
    /// Builds a page, deriving `page_count` from `record_count` and `page_size`.
    ///
    /// A `page_size` of zero yields a `page_count` of zero.
    #[must_use]
    pub fn new(current_page: u64, page_size: u64, record_count: u64, results: Vec<T>) -> Self {
        Self {
            current_page,
            page_size,
            record_count,
            page_count: page_count(record_count, page_size),
            results,
        }
    }

    #[must_use]
    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    #[must_use]
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    #[must_use]
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    #[must_use]
    pub fn page_count(&self) -> u64 {
        self.page_count
    }

    #[must_use]
    pub fn results(&self) -> &[T] {
        &self.results
    }

    #[must_use]
    pub fn into_results(self) -> Vec<T> {
        self.results
    }

    /// Position of the first record of this page within the whole query.
    ///
    /// Page 0 starts at 0. Saturates instead of overflowing.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.current_page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.page_count
    }

    /// Converts every result while keeping the page metadata, e.g. from a
    /// database model into the type returned by an API.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            current_page: self.current_page,
            page_size: self.page_size,
            record_count: self.record_count,
            page_count: self.page_count,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// Number of pages needed for `record_count` records, rounding up.
#[must_use]
pub fn page_count(record_count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    record_count.div_ceil(page_size)
}

/// Offset of the first record of a 1-based page, `None` for page 0 or on overflow.
#[must_use]
pub fn page_offset(page_number: u64, page_size: u64) -> Option<u64> {
    page_number.checked_sub(1)?.checked_mul(page_size)
}
