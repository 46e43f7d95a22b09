//! Configuration for extraction runs.
//!
//! Collects the knobs exposed to the batch driver: which archive member to
//! read, its text encoding, the event-attribution policy, and the export
//! format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_MEMBER_PATTERN, EXPORT_FORMATS};
use crate::error::DasError;

/// Text encoding of the archive member.
///
/// DASGIP exports use a legacy single-byte "ANSI" encoding; Windows-1252
/// covers it. UTF-8 is accepted for re-exported files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    Ansi,
    Utf8,
}

impl FromStr for TextEncoding {
    type Err = DasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ansi" | "windows-1252" | "cp1252" => Ok(TextEncoding::Ansi),
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            other => Err(DasError::Configuration {
                message: format!(
                    "unsupported encoding '{other}' (expected 'ansi' or 'utf8')"
                ),
            }),
        }
    }
}

/// Output format of the export glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// One delimited file per archive per reactor
    Csv,
    /// One workbook per archive, one sheet per reactor
    Xlsx,
}

impl FromStr for ExportFormat {
    type Err = DasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(DasError::Configuration {
                message: format!(
                    "\"export_format\" should be one of: {}. It was \"{other}\" instead.",
                    EXPORT_FORMATS
                        .iter()
                        .map(|f| format!("\"{f}\""))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// Settings for one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Substring matched against archive member names
    pub member_pattern: String,

    /// Encoding of the matched member
    pub encoding: TextEncoding,

    /// If true, only events explicitly referencing a reactor are merged
    /// into that reactor's table. If false, reactor-unspecific events are
    /// merged into every reactor's table as well.
    pub strict: bool,

    /// Export format used by the batch driver
    pub export_format: ExportFormat,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            member_pattern: DEFAULT_MEMBER_PATTERN.to_string(),
            encoding: TextEncoding::Ansi,
            strict: true,
            export_format: ExportFormat::Xlsx,
        }
    }
}
