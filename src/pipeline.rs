//! One-shot scrape runs.
//!
//! A run moves through `Collecting` (pages fanned out and back in),
//! `Normalizing` (columns flattened into rows), and ends `Complete` or
//! `Failed`. Nothing is kept between runs.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::ScraperConfig;
use crate::error::ScrapeResult;
use crate::models::{ReviewColumns, ScrapeOutcome, ScrapeRequest};
use crate::scrapers::{HttpClient, Orchestrator, PageFetcher};
use crate::services::{company_identifier, normalize};

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Collecting,
    Normalizing,
    Complete,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Collecting => "collecting",
            RunState::Normalizing => "normalizing",
            RunState::Complete => "complete",
            RunState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeReport {
    pub outcome: ScrapeOutcome,
    /// State the run finished in.
    pub state: RunState,
    /// Company identifier stamped on every row.
    pub company: String,
    pub pages_dispatched: u32,
    pub pages_failed: usize,
}

/// Runs scrapes against a page source.
pub struct ReviewScraper {
    orchestrator: Orchestrator,
    config: ScraperConfig,
}

impl ReviewScraper {
    /// Create a scraper that fetches over HTTP.
    pub fn new(config: ScraperConfig) -> ScrapeResult<Self> {
        config.validate()?;
        let client = HttpClient::from_config(&config)?;
        Self::with_fetcher(Arc::new(client), config)
    }

    /// Create a scraper with a custom page source.
    pub fn with_fetcher(
        fetcher: Arc<dyn PageFetcher>,
        config: ScraperConfig,
    ) -> ScrapeResult<Self> {
        config.validate()?;
        Ok(Self {
            orchestrator: Orchestrator::new(fetcher, &config),
            config,
        })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Build a request with this scraper's page cap applied.
    pub fn request(&self, base_url: &str, pages: u32) -> ScrapeRequest {
        ScrapeRequest::new(base_url, pages, self.config.max_pages)
    }

    /// Scrape `pages` pages of `base_url`.
    pub async fn scrape(&self, base_url: &str, pages: u32) -> ScrapeResult<ScrapeReport> {
        let request = self.request(base_url, pages);
        self.run(&request).await
    }

    /// Execute one run.
    pub async fn run(&self, request: &ScrapeRequest) -> ScrapeResult<ScrapeReport> {
        let mut state = RunState::Collecting;
        debug!(%state, base_url = request.base_url(), "Run started");

        let company = company_identifier(request.input_url());
        let pages = self.orchestrator.collect(request).await;
        let pages_failed = pages.iter().filter(|p| p.is_failed()).count();

        let mut columns = ReviewColumns::default();
        for page in pages {
            columns.extend(page.into_columns());
        }

        transition(&mut state, RunState::Normalizing);
        let table = match normalize(columns, &company, self.config.strict) {
            Ok(table) => table,
            Err(e) => {
                transition(&mut state, RunState::Failed);
                error!("Scrape of {} failed: {}", request.base_url(), e);
                return Err(e);
            }
        };

        transition(&mut state, RunState::Complete);
        let outcome = ScrapeOutcome::from_table(table);
        info!(
            company = %company,
            rows = outcome.row_count(),
            pages = request.pages(),
            pages_failed,
            "Scrape complete"
        );

        Ok(ScrapeReport {
            outcome,
            state,
            company,
            pages_dispatched: request.pages(),
            pages_failed,
        })
    }
}

fn transition(state: &mut RunState, next: RunState) {
    debug!("Run state {} -> {}", state, next);
    *state = next;
}
