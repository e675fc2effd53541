//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use trustscrape::{ExportFormat, ScraperConfig};

#[derive(Parser)]
#[command(name = "trustscrape")]
#[command(about = "Scrape review pages into a flat table")]
#[command(version)]
pub struct Cli {
    /// Config file path (TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape reviews from a listing URL
    Scrape {
        /// Listing URL, e.g. https://uk.trustpilot.com/review/www.tesco.com
        url: String,
        /// Number of pages to fetch (clamped to the configured maximum)
        #[arg(short, long, default_value = "1")]
        pages: u32,
        /// Output format (defaults to the output file extension, then csv)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fail when a review is missing any field
        #[arg(long)]
        strict: bool,
    },

    /// Print the output column names
    Columns,
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            url,
            pages,
            format,
            output,
            strict,
        } => {
            let mut config = ScraperConfig::load(cli.config.as_deref()).await?;
            config.strict |= strict;
            scrape::cmd_scrape(config, &url, pages, format, output.as_deref()).await
        }
        Commands::Columns => {
            println!("{}", trustscrape::COLUMNS.join("\n"));
            Ok(())
        }
    }
}
