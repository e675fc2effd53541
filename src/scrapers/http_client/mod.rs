//! HTTP client used to fetch review pages.
//!
//! Each call is an independent GET with default client settings: no cookie
//! store, no retries, no extra headers. Non-success statuses are reported as
//! errors so the orchestrator can drop the page without touching its siblings.

mod response;

pub use response::HttpResponse;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ScraperConfig;
use crate::error::{FetchError, ScrapeResult};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("trustscrape/", env!("CARGO_PKG_VERSION"));

/// Source of raw page text.
///
/// Implemented by [`HttpClient`]; tests substitute canned pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page body, failing on transport errors and non-2xx statuses.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP client with request timing logs.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with the given request timeout.
    pub fn new(timeout: Duration) -> ScrapeResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Build a client from scraper settings.
    pub fn from_config(config: &ScraperConfig) -> ScrapeResult<Self> {
        Self::new(config.timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Make a GET request.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let duration = start.elapsed();

        tracing::debug!(
            url,
            status = response.status().as_u16(),
            duration_ms = duration.as_millis() as u64,
            "GET"
        );

        Ok(HttpResponse {
            status: response.status(),
            response,
        })
    }

    /// Get page content as text, treating non-success statuses as errors.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.get(url).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status.as_u16(),
            });
        }
        if let Some(content_type) = response.content_type() {
            if !content_type.contains("html") {
                tracing::debug!(url, content_type, "Page is not HTML");
            }
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.get_text(url).await
    }
}
