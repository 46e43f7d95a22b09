//! Spreadsheet export: one workbook per archive, one sheet per reactor.

use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::CdfDict;

/// Write all reactor tables into `<base>.xlsx`, sheet names being the
/// stringified reactor numbers.
pub fn export_cdf_dict_to_xlsx(cdf_dict: &CdfDict, base: &Path) -> Result<Vec<PathBuf>> {
    if cdf_dict.is_empty() {
        warn!("no reactor tables to export; workbook not written");
        return Ok(Vec::new());
    }

    let mut workbook = Workbook::new();
    for (reactor_number, cdf) in cdf_dict {
        debug!("writing reactor {reactor_number} sheet");
        let sheet = workbook.add_worksheet();
        sheet.set_name(reactor_number.to_string())?;
        write_frame(sheet, cdf)?;
    }

    let path = PathBuf::from(format!("{}.xlsx", base.display()));
    workbook.save(&path)?;
    Ok(vec![path])
}

fn write_frame(sheet: &mut Worksheet, cdf: &DataFrame) -> Result<()> {
    for (column_index, column) in cdf.get_columns().iter().enumerate() {
        let sheet_column = column_index as u16;
        sheet.write_string(0, sheet_column, column.name().as_str())?;
        for row in 0..cdf.height() {
            let sheet_row = row as u32 + 1;
            match column.get(row)? {
                AnyValue::Null => {}
                AnyValue::Float64(value) => {
                    sheet.write_number(sheet_row, sheet_column, value)?;
                }
                AnyValue::String(value) => {
                    sheet.write_string(sheet_row, sheet_column, value)?;
                }
                other => {
                    sheet.write_string(sheet_row, sheet_column, other.to_string())?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use tempfile::TempDir;

    #[test]
    fn writes_one_workbook_with_a_sheet_per_reactor() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("culture");

        let mut cdf_dict = CdfDict::new();
        for reactor in [1u32, 2u32] {
            cdf_dict.insert(
                reactor,
                df!(
                    "Timestamp" => [Some("01.02.2021 10:00:00"), None],
                    "DO.PV [%DO]" => [Some(98.0), None],
                )
                .unwrap(),
            );
        }

        let written = export_cdf_dict_to_xlsx(&cdf_dict, &base).unwrap();

        assert_eq!(written.len(), 1);
        let workbook_path = dir.path().join("culture.xlsx");
        assert!(workbook_path.exists());
        assert!(std::fs::metadata(&workbook_path).unwrap().len() > 0);
    }

    #[test]
    fn empty_dict_writes_no_workbook() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("culture");

        let written = export_cdf_dict_to_xlsx(&CdfDict::new(), &base).unwrap();

        assert!(written.is_empty());
        assert!(!dir.path().join("culture.xlsx").exists());
    }
}
