//! Error types for the scrape pipeline.
//!
//! Page-scoped failures ([`FetchError`], [`ExtractError`]) are absorbed by the
//! orchestrator and only surface as a [`PageFailure`] tag. Run-scoped failures
//! ([`ScrapeError`]) propagate to the caller.

use thiserror::Error;

/// Failure to retrieve a single page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status}")]
    Status { status: u16 },
}

/// Failure to pull the structured-data document out of a page.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Structured-data block not found")]
    MissingBlock,

    #[error("Malformed JSON in structured-data block: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Structured-data document has no @graph array")]
    MissingGraph,
}

/// Why a page contributed no reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFailure {
    /// Connection, DNS, timeout or body read error.
    Transport,
    /// Server answered with a non-success status.
    Status(u16),
    /// Page fetched but its structured data was absent or unreadable.
    Parse,
    /// Worker ended without reporting the page.
    Aborted,
}

impl From<&FetchError> for PageFailure {
    fn from(e: &FetchError) -> Self {
        match e {
            FetchError::Transport(_) => PageFailure::Transport,
            FetchError::Status { status } => PageFailure::Status(*status),
        }
    }
}

/// Run-level errors returned to the caller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(
        "Review columns are misaligned (reviews={reviews}, headlines={headlines}, \
         ratings={ratings}, authors={authors}, dates={dates})"
    )]
    Alignment {
        reviews: usize,
        headlines: usize,
        ratings: usize,
        authors: usize,
        dates: usize,
    },

    #[error("Review {index} is missing field '{field}'")]
    IncompleteReview { index: usize, field: &'static str },

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for run-level operations.
pub type ScrapeResult<T> = Result<T, ScrapeError>;
