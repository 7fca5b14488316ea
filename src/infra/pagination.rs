use serde::{Deserialize, Serialize};

/// Pagination parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// The 0-indexed page to fetch.
    page: Option<i64>,
    /// The number of elements per page.
    page_size: Option<i64>,
}

impl PaginationParams {
    /// Constructs parameters for a specific page.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(page.max(0)),
            page_size: Some(page_size.max(0)),
        }
    }

    /// The page, never negative.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }

    /// The page size, never negative.
    pub fn page_size(&self) -> i64 {
        self.page_size.unwrap_or(50).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.page_size()
    }

    pub fn offset(&self) -> i64 {
        self.page().saturating_mul(self.page_size())
    }

    /// The parameters for the page after this one.
    pub fn next(&self) -> Self {
        Self::new(self.page().saturating_add(1), self.page_size())
    }
}
