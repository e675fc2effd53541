//! trustscrape - review page scraper.
//!
//! Fetches review listing pages concurrently, pulls the `Review` entries out
//! of each page's embedded JSON-LD block, and flattens them into a table with
//! a fixed column order.
//!
//! ```no_run
//! use trustscrape::{ReviewScraper, ScrapeOutcome, ScraperConfig};
//!
//! # async fn demo() -> Result<(), trustscrape::ScrapeError> {
//! let scraper = ReviewScraper::new(ScraperConfig::default())?;
//! let report = scraper
//!     .scrape("https://uk.trustpilot.com/review/www.tesco.com", 3)
//!     .await?;
//! match report.outcome {
//!     ScrapeOutcome::Empty => println!("No reviews found"),
//!     ScrapeOutcome::Table(table) => println!("{} reviews", table.len()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod scrapers;
pub mod services;

pub use config::ScraperConfig;
pub use error::{ExtractError, FetchError, PageFailure, ScrapeError, ScrapeResult};
pub use models::{PageResult, ResultTable, ReviewRow, ScrapeOutcome, ScrapeRequest, COLUMNS};
pub use pipeline::{ReviewScraper, RunState, ScrapeReport};
pub use scrapers::{HttpClient, PageFetcher};
pub use services::ExportFormat;
