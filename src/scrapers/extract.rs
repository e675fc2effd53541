//! Structured-data extraction from review pages.
//!
//! Review pages embed a JSON-LD document in a
//! `<script data-business-unit-json-ld="true">` element. Its `@graph` array
//! holds typed entries; only those tagged `Review` are kept.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::ExtractError;
use crate::models::ReviewEntry;

/// CSS selector for the business structured-data block.
pub const STRUCTURED_DATA_SELECTOR: &str = r#"script[data-business-unit-json-ld="true"]"#;

static STRUCTURED_DATA: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(STRUCTURED_DATA_SELECTOR).expect("structured-data selector is valid")
});

/// Locate the structured-data block and parse it as JSON.
pub fn parse_structured_data(html: &str) -> Result<Value, ExtractError> {
    let document = Html::parse_document(html);
    let script = document
        .select(&STRUCTURED_DATA)
        .next()
        .ok_or(ExtractError::MissingBlock)?;

    let text: String = script.text().collect();
    Ok(serde_json::from_str(text.trim())?)
}

/// Select the `Review` entries of a parsed document's `@graph`.
///
/// Entry order is preserved. Each entry yields exactly one [`ReviewEntry`]
/// so per-field lists built from the result stay index-aligned.
pub fn review_entries(document: &Value) -> Result<Vec<ReviewEntry>, ExtractError> {
    let graph = document
        .get("@graph")
        .and_then(|g| g.as_array())
        .ok_or(ExtractError::MissingGraph)?;

    Ok(graph
        .iter()
        .filter(|entry| ReviewEntry::is_review(entry))
        .map(ReviewEntry::from_value)
        .collect())
}

/// Extract every review from a page's HTML.
pub fn extract_reviews(html: &str) -> Result<Vec<ReviewEntry>, ExtractError> {
    let document = parse_structured_data(html)?;
    review_entries(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(json_ld: &str) -> String {
        format!(
            r#"<html><head>
            <script type="application/ld+json">{{"@type": "WebSite"}}</script>
            <script type="application/ld+json" data-business-unit-json-ld="true">
            {}
            </script></head><body><h1>Reviews</h1></body></html>"#,
            json_ld
        )
    }

    #[test]
    fn test_extract_reviews_filters_by_type() {
        let doc = json!({
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "Organization", "name": "Tesco"},
                {
                    "@type": "Review",
                    "reviewBody": "Good",
                    "headline": "Nice",
                    "reviewRating": {"ratingValue": "4"},
                    "author": {"name": "Jo", "url": "https://example.com/users/jo"},
                    "datePublished": "2024-01-02"
                },
                {"@type": "BreadcrumbList"},
                {"@type": "Review", "headline": "Second"}
            ]
        });
        let html = page(&doc.to_string());

        let reviews = extract_reviews(&html).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].body.as_deref(), Some("Good"));
        assert_eq!(reviews[1].headline.as_deref(), Some("Second"));
        assert_eq!(reviews[1].body, None);
    }

    #[test]
    fn test_missing_block() {
        let html = "<html><body><p>No data here</p></body></html>";
        assert!(matches!(
            extract_reviews(html),
            Err(ExtractError::MissingBlock)
        ));
    }

    #[test]
    fn test_untagged_json_ld_is_ignored() {
        let html = r#"<script type="application/ld+json">{"@graph": []}</script>"#;
        assert!(matches!(
            parse_structured_data(html),
            Err(ExtractError::MissingBlock)
        ));
    }

    #[test]
    fn test_malformed_json() {
        let html = page("{ not json");
        assert!(matches!(
            extract_reviews(&html),
            Err(ExtractError::MalformedJson(_))
        ));
    }

    #[test]
    fn test_missing_graph() {
        let html = page(r#"{"@type": "Organization"}"#);
        assert!(matches!(
            extract_reviews(&html),
            Err(ExtractError::MissingGraph)
        ));
    }

    #[test]
    fn test_graph_without_reviews() {
        let html = page(r#"{"@graph": [{"@type": "Organization"}]}"#);
        assert!(extract_reviews(&html).unwrap().is_empty());
    }
}
