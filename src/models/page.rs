//! Per-page outcome of a fetch + extract task.

use crate::error::PageFailure;

use super::review::{ReviewColumns, ReviewEntry};

/// What one page contributed to the run.
///
/// `failure` is set when the page was fetched or parsed unsuccessfully; such
/// pages carry no reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub page: u32,
    pub url: String,
    pub reviews: Vec<ReviewEntry>,
    pub failure: Option<PageFailure>,
}

impl PageResult {
    pub fn parsed(page: u32, url: String, reviews: Vec<ReviewEntry>) -> Self {
        Self {
            page,
            url,
            reviews,
            failure: None,
        }
    }

    pub fn failed(page: u32, url: String, failure: PageFailure) -> Self {
        Self {
            page,
            url,
            reviews: Vec::new(),
            failure: Some(failure),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// This page's reviews as index-aligned columns.
    pub fn into_columns(self) -> ReviewColumns {
        ReviewColumns::from_entries(self.reviews)
    }
}
