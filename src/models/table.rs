//! Flattened output table.

use serde::Serialize;

/// Output columns, in their fixed order.
pub const COLUMNS: [&str; 7] = [
    "company",
    "date",
    "headline",
    "review",
    "author_name",
    "author_url",
    "rating_value",
];

/// One flattened review.
///
/// Field order matches [`COLUMNS`]; serializers rely on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRow {
    pub company: String,
    pub date: Option<String>,
    pub headline: Option<String>,
    pub review: Option<String>,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    pub rating_value: Option<f64>,
}

impl ReviewRow {
    /// Cell values as strings in column order. Absent values are empty.
    pub fn cells(&self) -> [String; 7] {
        [
            self.company.clone(),
            self.date.clone().unwrap_or_default(),
            self.headline.clone().unwrap_or_default(),
            self.review.clone().unwrap_or_default(),
            self.author_name.clone().unwrap_or_default(),
            self.author_url.clone().unwrap_or_default(),
            self.rating_value.map(format_rating).unwrap_or_default(),
        ]
    }
}

/// Whole ratings render without a fractional part.
fn format_rating(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// The run's dataset: one row per review.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    rows: Vec<ReviewRow>,
}

impl ResultTable {
    pub fn new(rows: Vec<ReviewRow>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[ReviewRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Final result handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeOutcome {
    /// No reviews were found on any page.
    Empty,
    /// At least one review row.
    Table(ResultTable),
}

impl ScrapeOutcome {
    /// Wrap a table, mapping zero rows to [`ScrapeOutcome::Empty`].
    pub fn from_table(table: ResultTable) -> Self {
        if table.is_empty() {
            ScrapeOutcome::Empty
        } else {
            ScrapeOutcome::Table(table)
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            ScrapeOutcome::Empty => 0,
            ScrapeOutcome::Table(table) => table.len(),
        }
    }

    pub fn table(&self) -> Option<&ResultTable> {
        match self {
            ScrapeOutcome::Empty => None,
            ScrapeOutcome::Table(table) => Some(table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ReviewRow {
        ReviewRow {
            company: "www.tesco.com".to_string(),
            date: Some("2024-03-01".to_string()),
            headline: None,
            review: Some("Fine".to_string()),
            author_name: Some("Sam".to_string()),
            author_url: None,
            rating_value: Some(4.0),
        }
    }

    #[test]
    fn test_cells_follow_column_order() {
        assert_eq!(
            row().cells(),
            [
                "www.tesco.com".to_string(),
                "2024-03-01".to_string(),
                String::new(),
                "Fine".to_string(),
                "Sam".to_string(),
                String::new(),
                "4".to_string(),
            ]
        );
    }

    #[test]
    fn test_fractional_rating() {
        assert_eq!(format_rating(4.5), "4.5");
        assert_eq!(format_rating(1.0), "1");
    }

    #[test]
    fn test_serialized_keys_match_columns() {
        let value = serde_json::to_value(row()).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        for column in COLUMNS {
            assert!(keys.contains(&column), "missing {}", column);
        }
        assert_eq!(keys.len(), COLUMNS.len());
    }

    #[test]
    fn test_outcome_empty_signal() {
        assert_eq!(
            ScrapeOutcome::from_table(ResultTable::default()),
            ScrapeOutcome::Empty
        );
        let outcome = ScrapeOutcome::from_table(ResultTable::new(vec![row()]));
        assert_eq!(outcome.row_count(), 1);
        assert!(outcome.table().is_some());
    }
}
