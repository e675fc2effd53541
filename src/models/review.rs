//! Review records as found in a page's JSON-LD `@graph`.
//!
//! Every field is optional: upstream entries are loosely typed and a missing
//! or oddly typed field becomes `None` rather than an extraction failure.

use serde::Serialize;
use serde_json::Value;

/// `@type` tag of the graph entries we keep.
pub const REVIEW_TYPE: &str = "Review";

/// Nested `reviewRating` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    pub value: Option<f64>,
}

impl Rating {
    /// Read a `reviewRating` object. Non-objects yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let value = obj.get("ratingValue").and_then(number_field);
        Some(Self { value })
    }
}

/// Nested `author` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub name: Option<String>,
    /// Profile URL of the reviewer.
    pub url: Option<String>,
}

impl Author {
    /// Read an `author` object. Non-objects yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            name: obj.get("name").and_then(text_field),
            url: obj.get("url").and_then(text_field),
        })
    }
}

/// One `Review` entry from the graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReviewEntry {
    pub body: Option<String>,
    pub headline: Option<String>,
    pub rating: Option<Rating>,
    pub author: Option<Author>,
    pub date_published: Option<String>,
}

impl ReviewEntry {
    /// Check whether a graph entry is tagged as a review.
    pub fn is_review(entry: &Value) -> bool {
        match entry.get("@type") {
            Some(Value::String(t)) => t == REVIEW_TYPE,
            Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(REVIEW_TYPE)),
            _ => false,
        }
    }

    /// Read the five review fields from a graph entry.
    pub fn from_value(entry: &Value) -> Self {
        Self {
            body: entry.get("reviewBody").and_then(text_field),
            headline: entry.get("headline").and_then(text_field),
            rating: entry.get("reviewRating").and_then(Rating::from_value),
            author: entry.get("author").and_then(Author::from_value),
            date_published: entry.get("datePublished").and_then(text_field),
        }
    }
}

/// Strings as-is, numbers and booleans stringified, everything else absent.
fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Finite numbers and numeric strings, everything else absent.
fn number_field(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|v: &f64| v.is_finite())
}

/// The five review fields as parallel, index-aligned lists.
///
/// Index `i` of every list belongs to the same review.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewColumns {
    pub reviews: Vec<Option<String>>,
    pub headlines: Vec<Option<String>>,
    pub ratings: Vec<Option<Rating>>,
    pub authors: Vec<Option<Author>>,
    pub dates: Vec<Option<String>>,
}

impl ReviewColumns {
    /// Split entries into columns. Always aligned.
    pub fn from_entries(entries: Vec<ReviewEntry>) -> Self {
        let mut columns = Self::default();
        for entry in entries {
            columns.push(entry);
        }
        columns
    }

    /// Append one review across all five lists.
    pub fn push(&mut self, entry: ReviewEntry) {
        self.reviews.push(entry.body);
        self.headlines.push(entry.headline);
        self.ratings.push(entry.rating);
        self.authors.push(entry.author);
        self.dates.push(entry.date_published);
    }

    /// Concatenate another page's columns onto these.
    pub fn extend(&mut self, other: ReviewColumns) {
        self.reviews.extend(other.reviews);
        self.headlines.extend(other.headlines);
        self.ratings.extend(other.ratings);
        self.authors.extend(other.authors);
        self.dates.extend(other.dates);
    }

    /// Lengths in (reviews, headlines, ratings, authors, dates) order.
    pub fn lengths(&self) -> [usize; 5] {
        [
            self.reviews.len(),
            self.headlines.len(),
            self.ratings.len(),
            self.authors.len(),
            self.dates.len(),
        ]
    }

    pub fn is_aligned(&self) -> bool {
        let lengths = self.lengths();
        lengths.iter().all(|&l| l == lengths[0])
    }

    /// Number of reviews, or `None` if the lists disagree.
    pub fn len(&self) -> Option<usize> {
        self.is_aligned().then(|| self.reviews.len())
    }

    pub fn is_empty(&self) -> bool {
        self.lengths().iter().all(|&l| l == 0)
    }
}
