//! Immutable input for one scrape run.

use url::Url;

/// Base listing URL plus the number of pages to fetch.
///
/// The page count is clamped to `1..=max_pages` on construction and never
/// changes afterwards. Page URLs are built from the trimmed URL; the input is
/// kept as given for deriving the company identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    input_url: String,
    base_url: String,
    pages: u32,
}

impl ScrapeRequest {
    /// Build a request, clamping `pages` into `1..=max_pages`.
    pub fn new(base_url: impl Into<String>, pages: u32, max_pages: u32) -> Self {
        let input_url = base_url.into();
        let base_url = input_url.trim().to_string();
        let cap = max_pages.max(1);
        let clamped = pages.clamp(1, cap);
        if clamped != pages {
            tracing::debug!(requested = pages, clamped, "Clamped page count");
        }
        Self {
            input_url,
            base_url,
            pages: clamped,
        }
    }

    /// The URL exactly as supplied.
    pub fn input_url(&self) -> &str {
        &self.input_url
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of pages that will be dispatched.
    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Per-page URLs, 1-indexed, in page order.
    pub fn page_urls(&self, page_param: &str) -> Vec<(u32, String)> {
        (1..=self.pages)
            .map(|page| (page, page_url(&self.base_url, page_param, page)))
            .collect()
    }
}

/// Append the page-index parameter to a base URL.
///
/// Existing query parameters are kept. Unparseable URLs fall back to plain
/// string concatenation so the fetch layer reports the failure.
pub fn page_url(base_url: &str, page_param: &str, page: u32) -> String {
    if let Ok(mut url) = Url::parse(base_url) {
        url.query_pairs_mut().append_pair(page_param, &page.to_string());
        return url.to_string();
    }

    let sep = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", base_url, sep, page_param, page)
}
