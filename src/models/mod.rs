//! Data models for trustscrape.

mod page;
mod request;
mod review;
mod table;

pub use page::PageResult;
pub use request::ScrapeRequest;
pub use review::{Author, Rating, ReviewColumns, ReviewEntry, REVIEW_TYPE};
pub use table::{ResultTable, ReviewRow, ScrapeOutcome, COLUMNS};
