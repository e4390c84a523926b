//! # Pagination Errors
//!
//! The library adds no error taxonomy of its own beyond argument checks.
//! Anything the query engine reports (translation failures, lost connections,
//! timeouts) is carried unchanged in [`PaginateError::Query`].
//!
//! ```rust,ignore
//! match paginate_async(query, 0, 10).await {
//!     Err(PaginateError::InvalidPageNumber(_)) => { /* caller bug */ }
//!     Err(PaginateError::Query(db_err)) => { /* engine failure */ }
//!     Ok(page) => { /* ... */ }
//!     Err(other) => { /* ... */ }
//! }
//! ```

use std::error::Error;
use std::fmt;

/// Failure of a pagination call.
///
/// `E` is the error type of the query engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginateError<E> {
    /// Page numbers are 1-based; 0 was given.
    InvalidPageNumber(u64),

    /// A page must hold at least one record; 0 was given.
    InvalidPageSize(u64),

    /// The offset or `page_size` is above
    /// [`MAX_OFFSET`](crate::pagination::MAX_OFFSET), or the offset overflows.
    OffsetOverflow {
        page_number: u64,
        page_size: u64,
    },

    /// Error reported by the query engine, passed through untouched.
    Query(E),
}

impl<E> PaginateError<E> {
    /// True for errors caused by the arguments rather than the engine.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, Self::Query(_))
    }

    /// The engine error, if this is one.
    pub fn query_error(&self) -> Option<&E> {
        match self {
            Self::Query(err) => Some(err),
            _ => None,
        }
    }

    pub fn into_query_error(self) -> Option<E> {
        match self {
            Self::Query(err) => Some(err),
            _ => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for PaginateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPageNumber(page_number) => {
                write!(f, "Invalid page number {page_number}: pages start at 1")
            }
            Self::InvalidPageSize(page_size) => {
                write!(f, "Invalid page size {page_size}: must be at least 1")
            }
            Self::OffsetOverflow {
                page_number,
                page_size,
            } => write!(
                f,
                "Page {page_number} with page size {page_size} is out of range"
            ),
            Self::Query(err) => write!(f, "Query failed: {err}"),
        }
    }
}

impl<E: Error + 'static> Error for PaginateError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) => Some(err),
            _ => None,
        }
    }
}
