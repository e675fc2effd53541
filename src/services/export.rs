//! Render a result table as CSV, JSON, or JSON Lines.

use std::io::{self, Write};
use std::path::Path;

use crate::models::{ResultTable, COLUMNS};

/// Export format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// Pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

impl ExportFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "jsonl" | "ndjson" => Some(Self::Jsonl),
            _ => None,
        }
    }
}

/// Write the table in the given format.
pub fn write_table<W: Write>(table: &ResultTable, format: ExportFormat, out: W) -> io::Result<()> {
    match format {
        ExportFormat::Csv => write_csv(table, out),
        ExportFormat::Json => write_json(table, out),
        ExportFormat::Jsonl => write_jsonl(table, out),
    }
}

/// Write a header row followed by one line per review.
pub fn write_csv<W: Write>(table: &ResultTable, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", COLUMNS.join(","))?;
    for row in table.rows() {
        let line: Vec<String> = row.cells().iter().map(|c| escape_csv(c)).collect();
        writeln!(out, "{}", line.join(","))?;
    }
    out.flush()
}

/// Write the rows as a pretty-printed JSON array.
pub fn write_json<W: Write>(table: &ResultTable, mut out: W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut out, table.rows())?;
    writeln!(out)?;
    out.flush()
}

/// Write one JSON object per row.
pub fn write_jsonl<W: Write>(table: &ResultTable, mut out: W) -> io::Result<()> {
    for row in table.rows() {
        serde_json::to_writer(&mut out, row)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewRow;

    fn table() -> ResultTable {
        ResultTable::new(vec![
            ReviewRow {
                company: "www.tesco.com".to_string(),
                date: Some("2024-01-01".to_string()),
                headline: Some("Good, mostly".to_string()),
                review: Some("Said \"fine\"\nthen left".to_string()),
                author_name: Some("Kim".to_string()),
                author_url: None,
                rating_value: Some(3.0),
            },
            ReviewRow {
                company: "www.tesco.com".to_string(),
                date: None,
                headline: None,
                review: None,
                author_name: None,
                author_url: None,
                rating_value: None,
            },
        ])
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        write_csv(&table(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(
            "company,date,headline,review,author_name,author_url,rating_value\n"
        ));
        assert!(text.contains(
            "www.tesco.com,2024-01-01,\"Good, mostly\",\"Said \"\"fine\"\"\nthen left\",Kim,,3\n"
        ));
        assert!(text.ends_with("www.tesco.com,,,,,,\n"));
    }

    #[test]
    fn test_write_jsonl_one_line_per_row() {
        let mut out = Vec::new();
        write_jsonl(&table(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["author_name"], "Kim");
        assert_eq!(first["rating_value"], 3.0);
    }

    #[test]
    fn test_write_json_array() {
        let mut out = Vec::new();
        write_table(&table(), ExportFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().map(|a| a.len()), Some(2));
        assert!(value[1]["headline"].is_null());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/reviews.CSV")),
            Some(ExportFormat::Csv)
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("reviews.ndjson")),
            Some(ExportFormat::Jsonl)
        );
        assert_eq!(ExportFormat::from_path(Path::new("reviews.xlsx")), None);
    }
}
