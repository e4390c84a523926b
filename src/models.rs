use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query parameters selecting one page of a listing.
///
/// Both parameters are optional; a request without them gets the first page
/// of [`PageRequest::DEFAULT_PER_PAGE`] records.
///
/// ```text
/// GET /people?page=2&per_page=10
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// Page number, starting at 1.
    ///
    /// Example: `1`
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Number of records per page.
    ///
    /// Example: `25`
    #[param(example = 25)]
    pub per_page: Option<u64>,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_PER_PAGE: u64 = 25;

    #[must_use]
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    #[must_use]
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(Self::DEFAULT_PAGE)
    }

    #[must_use]
    pub fn per_page(&self) -> u64 {
        self.per_page.unwrap_or(Self::DEFAULT_PER_PAGE)
    }
}
