//! Flatten review columns into the output table.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ScrapeError, ScrapeResult};
use crate::models::{ResultTable, ReviewColumns, ReviewRow};

/// First `www.`-prefixed run of non-whitespace characters.
static COMPANY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"www\.\S+").expect("company pattern is valid"));

/// Derive the company identifier from the listing URL.
///
/// `https://uk.trustpilot.com/review/www.tesco.com` gives `www.tesco.com`.
/// URLs without a `www.` segment are returned unchanged.
pub fn company_identifier(url: &str) -> String {
    COMPANY_PATTERN
        .find(url)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| url.to_string())
}

/// Turn aligned review columns into one row per review.
///
/// Mismatched column lengths fail with [`ScrapeError::Alignment`]. With
/// `strict` set, a review lacking any of its five fields fails with
/// [`ScrapeError::IncompleteReview`]; otherwise the gap becomes an empty cell.
pub fn normalize(
    columns: ReviewColumns,
    company: &str,
    strict: bool,
) -> ScrapeResult<ResultTable> {
    if !columns.is_aligned() {
        let [reviews, headlines, ratings, authors, dates] = columns.lengths();
        return Err(ScrapeError::Alignment {
            reviews,
            headlines,
            ratings,
            authors,
            dates,
        });
    }

    if strict {
        check_complete(&columns)?;
    }

    let ReviewColumns {
        reviews,
        headlines,
        ratings,
        authors,
        dates,
    } = columns;

    let rows = reviews
        .into_iter()
        .zip(headlines)
        .zip(ratings)
        .zip(authors)
        .zip(dates)
        .map(|((((review, headline), rating), author), date)| {
            let (author_name, author_url) = match author {
                Some(a) => (a.name, a.url),
                None => (None, None),
            };
            ReviewRow {
                company: company.to_string(),
                date,
                headline,
                review,
                author_name,
                author_url,
                rating_value: rating.and_then(|r| r.value),
            }
        })
        .collect();

    Ok(ResultTable::new(rows))
}

/// Fail on the first review missing one of its five fields.
fn check_complete(columns: &ReviewColumns) -> ScrapeResult<()> {
    for index in 0..columns.reviews.len() {
        let missing = if columns.reviews[index].is_none() {
            Some("reviewBody")
        } else if columns.headlines[index].is_none() {
            Some("headline")
        } else if columns.ratings[index].is_none() {
            Some("reviewRating")
        } else if columns.authors[index].is_none() {
            Some("author")
        } else if columns.dates[index].is_none() {
            Some("datePublished")
        } else {
            None
        };

        if let Some(field) = missing {
            return Err(ScrapeError::IncompleteReview { index, field });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Rating, ReviewEntry, COLUMNS};

    fn entry(body: &str, rating: f64) -> ReviewEntry {
        ReviewEntry {
            body: Some(body.to_string()),
            headline: Some(format!("{} headline", body)),
            rating: Some(Rating {
                value: Some(rating),
            }),
            author: Some(Author {
                name: Some("Pat".to_string()),
                url: Some("https://example.com/users/pat".to_string()),
            }),
            date_published: Some("2024-05-06T07:08:09.000Z".to_string()),
        }
    }

    #[test]
    fn test_company_identifier_www_segment() {
        assert_eq!(
            company_identifier("https://uk.trustpilot.com/review/www.tesco.com"),
            "www.tesco.com"
        );
        assert_eq!(
            company_identifier("https://www.trustpilot.com/review/example.org"),
            "www.trustpilot.com/review/example.org"
        );
    }

    #[test]
    fn test_company_identifier_without_www() {
        let url = "https://uk.trustpilot.com/review/tesco.com";
        assert_eq!(company_identifier(url), url);
    }

    #[test]
    fn test_normalize_flattens_nested_fields() {
        let columns = ReviewColumns::from_entries(vec![entry("first", 5.0), entry("second", 2.0)]);
        let table = normalize(columns, "www.tesco.com", false).unwrap();

        assert_eq!(table.columns(), &COLUMNS);
        assert_eq!(table.len(), 2);
        let row = &table.rows()[1];
        assert_eq!(row.company, "www.tesco.com");
        assert_eq!(row.review.as_deref(), Some("second"));
        assert_eq!(row.headline.as_deref(), Some("second headline"));
        assert_eq!(row.author_name.as_deref(), Some("Pat"));
        assert_eq!(
            row.author_url.as_deref(),
            Some("https://example.com/users/pat")
        );
        assert_eq!(row.rating_value, Some(2.0));
        assert_eq!(row.date.as_deref(), Some("2024-05-06T07:08:09.000Z"));
    }

    #[test]
    fn test_normalize_absent_fields_become_empty() {
        let columns = ReviewColumns::from_entries(vec![ReviewEntry::default()]);
        let table = normalize(columns, "acme", false).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.company, "acme");
        assert_eq!(row.author_name, None);
        assert_eq!(row.rating_value, None);
    }

    #[test]
    fn test_normalize_rejects_misaligned_columns() {
        let mut columns = ReviewColumns::from_entries(vec![entry("a", 1.0), entry("b", 2.0)]);
        columns.dates.pop();

        match normalize(columns, "acme", false) {
            Err(ScrapeError::Alignment { reviews, dates, .. }) => {
                assert_eq!(reviews, 2);
                assert_eq!(dates, 1);
            }
            other => panic!("expected alignment error, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_rejects_incomplete_review() {
        let mut incomplete = entry("b", 3.0);
        incomplete.author = None;
        let columns = ReviewColumns::from_entries(vec![entry("a", 1.0), incomplete]);

        match normalize(columns, "acme", true) {
            Err(ScrapeError::IncompleteReview { index, field }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "author");
            }
            other => panic!("expected incomplete review error, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_empty_columns() {
        let table = normalize(ReviewColumns::default(), "acme", true).unwrap();
        assert!(table.is_empty());
    }
}
