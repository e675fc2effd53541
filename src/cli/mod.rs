//! Command-line interface for trustscrape.

mod commands;

pub use commands::{is_verbose, run};
