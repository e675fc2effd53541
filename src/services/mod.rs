//! Service layer: table normalization and export.
//!
//! Kept free of I/O scheduling so the CLI or any other front end can reuse it.

pub mod export;
pub mod normalize;

pub use export::{write_table, ExportFormat};
pub use normalize::{company_identifier, normalize};
