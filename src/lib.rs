//! DASGIP Processor Library
//!
//! A Rust library for converting DASGIP bioreactor controller zip exports
//! into per-reactor culture data frames ("cdf").
//!
//! This library provides tools for:
//! - Locating and decoding the culture log member inside a zip export
//! - Splitting the multi-section log into named tables, disambiguating
//!   repeated setup blocks
//! - Recovering well-formed tables from ragged, semicolon-delimited
//!   sections
//! - Canonicalizing per-reactor column names across two controller
//!   software versions
//! - Merging manually-logged volume events onto each reactor's time
//!   series, ordered by timestamp, with a recomputed inoculation-relative
//!   time axis
//! - Exporting one table per reactor as CSV files or one XLSX workbook

pub mod archive;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod export;
pub mod merge;
pub mod models;
pub mod processor;
pub mod sections;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{ExportFormat, ExtractorConfig, TextEncoding};
pub use error::{DasError, Result};
pub use models::{CdfDict, DasDict, ProcessingStats};
pub use processor::{BatchProcessor, extract};
