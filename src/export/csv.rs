//! Flat-file export: one delimited file per reactor.

use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::models::CdfDict;

/// Write each reactor's table to `<base>-<reactor>.csv`.
pub fn export_cdf_dict_to_csv(cdf_dict: &CdfDict, base: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(cdf_dict.len());
    for (reactor_number, cdf) in cdf_dict {
        debug!("writing reactor {reactor_number} as csv");
        let path = PathBuf::from(format!("{}-{reactor_number}.csv", base.display()));
        let mut file = File::create(&path)?;
        let mut frame = cdf.clone();
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut frame)?;
        written.push(path);
    }
    Ok(written)
}
