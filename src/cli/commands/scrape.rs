//! Scrape command implementation.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use console::style;

use trustscrape::services::write_table;
use trustscrape::{ExportFormat, ReviewScraper, ScrapeOutcome, ScraperConfig};

/// Scrape a listing and write the resulting table.
pub async fn cmd_scrape(
    config: ScraperConfig,
    url: &str,
    pages: u32,
    format: Option<ExportFormat>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let max_pages = config.max_pages;
    if pages > max_pages {
        eprintln!(
            "{} Requested {} pages, limiting to {}",
            style("!").yellow(),
            pages,
            max_pages
        );
    }

    let scraper = ReviewScraper::new(config)?;
    let report = scraper.scrape(url, pages).await?;

    if report.pages_failed > 0 {
        eprintln!(
            "{} {} of {} pages could not be scraped",
            style("!").yellow(),
            report.pages_failed,
            report.pages_dispatched
        );
    }

    let table = match report.outcome {
        ScrapeOutcome::Empty => {
            eprintln!("{} No reviews found.", style("✗").red());
            return Ok(());
        }
        ScrapeOutcome::Table(table) => table,
    };

    let format = format
        .or_else(|| output.and_then(ExportFormat::from_path))
        .unwrap_or_default();

    match output {
        Some(path) => {
            let file = File::create(path)?;
            write_table(&table, format, BufWriter::new(file))?;
            eprintln!(
                "{} Wrote {} reviews for {} to {}",
                style("✓").green(),
                table.len(),
                style(&report.company).cyan(),
                path.display()
            );
        }
        None => {
            write_table(&table, format, io::stdout().lock())?;
            eprintln!(
                "{} Scraped {} reviews for {}",
                style("✓").green(),
                table.len(),
                style(&report.company).cyan()
            );
        }
    }

    Ok(())
}
