//! Export glue writing culture data frames to disk.
//!
//! Thin I/O boundary around the extraction core: one delimited file per
//! reactor, or one workbook per archive with one sheet per reactor.

pub mod csv;
pub mod xlsx;

use std::path::{Path, PathBuf};

use crate::config::ExportFormat;
use crate::error::Result;
use crate::models::CdfDict;

/// Write every reactor table under `base` (the archive path without its
/// extension) in the requested format. Returns the paths written.
pub fn export_cdf_dict(
    cdf_dict: &CdfDict,
    base: &Path,
    format: ExportFormat,
) -> Result<Vec<PathBuf>> {
    match format {
        ExportFormat::Csv => csv::export_cdf_dict_to_csv(cdf_dict, base),
        ExportFormat::Xlsx => xlsx::export_cdf_dict_to_xlsx(cdf_dict, base),
    }
}
