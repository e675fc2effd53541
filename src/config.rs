//! Scraper configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ScrapeError, ScrapeResult};

/// Default maximum number of pages a single run may request.
pub const DEFAULT_MAX_PAGES: u32 = 25;

/// Default number of concurrent page workers.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default query parameter carrying the page index.
pub const DEFAULT_PAGE_PARAM: &str = "page";

/// Settings for a scrape run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScraperConfig {
    /// Upper bound on requested pages. Larger requests are clamped.
    pub max_pages: u32,
    /// Worker pool size, independent of the page count.
    pub concurrency: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Query parameter name for the page index.
    pub page_param: String,
    /// Fail the run when a review entry lacks one of its fields.
    pub strict: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_param: DEFAULT_PAGE_PARAM.to_string(),
            strict: false,
        }
    }
}

impl ScraperConfig {
    /// Per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject settings that would make a run impossible.
    pub fn validate(&self) -> ScrapeResult<()> {
        if self.max_pages == 0 {
            return Err(ScrapeError::Config("max_pages must be at least 1".into()));
        }
        if self.concurrency == 0 {
            return Err(ScrapeError::Config("concurrency must be at least 1".into()));
        }
        if self.page_param.trim().is_empty() {
            return Err(ScrapeError::Config("page_param must not be empty".into()));
        }
        Ok(())
    }

    /// Load configuration from a TOML or JSON file, chosen by extension.
    pub async fn load_from_path(path: &Path) -> ScrapeResult<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ScrapeError::Config(format!("Failed to read config file: {}", e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

        let config: ScraperConfig = match ext {
            "json" => serde_json::from_str(&contents)
                .map_err(|e| ScrapeError::Config(format!("Failed to parse JSON config: {}", e)))?,
            _ => toml::from_str(&contents)
                .map_err(|e| ScrapeError::Config(format!("Failed to parse TOML config: {}", e)))?,
        };

        config.validate()?;
        tracing::debug!("Loaded scraper config from {}", path.display());
        Ok(config)
    }

    /// Load from an optional path, falling back to defaults.
    pub async fn load(path: Option<&Path>) -> ScrapeResult<Self> {
        match path {
            Some(p) => Self::load_from_path(p).await,
            None => Ok(Self::default()),
        }
    }
}
