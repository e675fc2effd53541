//! Page fetching, structured-data extraction, and the concurrent page pool.

pub mod extract;
pub mod http_client;
pub mod orchestrator;

pub use extract::{extract_reviews, parse_structured_data, review_entries};
pub use http_client::{HttpClient, HttpResponse, PageFetcher};
pub use orchestrator::{fetch_page, Orchestrator};
