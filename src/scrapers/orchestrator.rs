//! Concurrent page fan-out and fan-in.
//!
//! A fixed pool of workers pulls page jobs from a shared queue, fetches and
//! extracts each page, and reports one [`PageResult`] per job. Failures stay
//! scoped to their page. The caller waits for every job before continuing.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::extract::extract_reviews;
use super::http_client::PageFetcher;
use crate::config::ScraperConfig;
use crate::error::PageFailure;
use crate::models::{PageResult, ScrapeRequest};

/// A page number and its URL.
type PageJob = (u32, String);

/// Dispatches fetch + extract work across a bounded worker pool.
pub struct Orchestrator {
    fetcher: Arc<dyn PageFetcher>,
    concurrency: usize,
    page_param: String,
}

impl Orchestrator {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &ScraperConfig) -> Self {
        Self {
            fetcher,
            concurrency: config.concurrency.max(1),
            page_param: config.page_param.clone(),
        }
    }

    /// Workers actually spawned for `pages` jobs.
    pub fn worker_count(&self, pages: u32) -> usize {
        self.concurrency.min(pages as usize).max(1)
    }

    /// Fetch and extract every page of the request.
    ///
    /// Returns exactly one result per page, sorted by page number.
    pub async fn collect(&self, request: &ScrapeRequest) -> Vec<PageResult> {
        let jobs = request.page_urls(&self.page_param);
        let total = jobs.len();
        let workers = self.worker_count(request.pages());

        info!(
            base_url = request.base_url(),
            pages = total,
            workers,
            "Dispatching page fetches"
        );

        // Queues are sized to hold every job so sends never wait on workers.
        let (job_tx, job_rx) = mpsc::channel::<PageJob>(total.max(1));
        let (result_tx, mut result_rx) = mpsc::channel::<PageResult>(total.max(1));

        let handles = self.spawn_workers(workers, job_rx, result_tx);

        let mut dispatched = Vec::with_capacity(total);
        for job in jobs {
            dispatched.push(job.clone());
            if job_tx.send(job).await.is_err() {
                break;
            }
        }
        drop(job_tx);

        let mut results = Vec::with_capacity(total);
        while let Some(result) = result_rx.recv().await {
            results.push(result);
        }

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Page worker failed: {}", e);
            }
        }

        fill_missing(&mut results, dispatched);
        results.sort_by_key(|r| r.page);

        let failed = results.iter().filter(|r| r.is_failed()).count();
        info!(pages = results.len(), failed, "All page fetches finished");

        results
    }

    /// Spawn worker tasks that drain the shared job queue.
    fn spawn_workers(
        &self,
        count: usize,
        job_rx: mpsc::Receiver<PageJob>,
        result_tx: mpsc::Sender<PageResult>,
    ) -> Vec<JoinHandle<()>> {
        let job_rx = Arc::new(Mutex::new(job_rx));
        let mut handles = Vec::with_capacity(count);

        for worker_id in 0..count {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let fetcher = self.fetcher.clone();

            let handle = tokio::spawn(async move {
                loop {
                    let job = {
                        let mut rx = job_rx.lock().await;
                        rx.recv().await
                    };

                    let (page, url) = match job {
                        Some(j) => j,
                        None => break,
                    };

                    debug!(worker_id, page, "Fetching page");
                    let result = fetch_page(fetcher.as_ref(), page, url).await;
                    if result_tx.send(result).await.is_err() {
                        break;
                    }
                }
            });

            handles.push(handle);
        }

        handles
    }
}

/// Fetch one page and extract its reviews. Never fails; errors are logged
/// and recorded on the result.
pub async fn fetch_page(fetcher: &dyn PageFetcher, page: u32, url: String) -> PageResult {
    let html = match fetcher.fetch(&url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(page, url = %url, "Error fetching page: {}", e);
            return PageResult::failed(page, url, PageFailure::from(&e));
        }
    };

    match extract_reviews(&html) {
        Ok(reviews) => {
            debug!(page, reviews = reviews.len(), "Extracted reviews");
            PageResult::parsed(page, url, reviews)
        }
        Err(e) => {
            warn!(page, url = %url, "Error parsing structured data: {}", e);
            PageResult::failed(page, url, PageFailure::Parse)
        }
    }
}

/// Record an aborted result for any dispatched page that never reported.
fn fill_missing(results: &mut Vec<PageResult>, dispatched: Vec<PageJob>) {
    let reported: HashSet<u32> = results.iter().map(|r| r.page).collect();
    for (page, url) in dispatched {
        if !reported.contains(&page) {
            warn!(page, "Page produced no result");
            results.push(PageResult::failed(page, url, PageFailure::Aborted));
        }
    }
}
