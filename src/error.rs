//! Error handling for DASGIP archive processing.
//!
//! Provides error types with context for archive access, section parsing,
//! and export failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("No member matching '{pattern}' found in archive: {path}")]
    MemberNotFound { path: PathBuf, pattern: String },

    #[error("Required section '{section}' missing from archive export")]
    MissingSection { section: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, DasError>;
