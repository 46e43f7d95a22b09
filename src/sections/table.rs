//! Table recovery for one section body.
//!
//! Section bodies are semicolon-delimited with a header row. Some sections
//! are ragged: data rows carry more columns than the header declares. The
//! table builder measures the full body first, extends the header with
//! synthetic `unknown<N>` names where needed, and only then materializes
//! rows, so no row is ever truncated or dropped.
//!
//! Cell typing mirrors the controller's loose format: a column whose every
//! non-empty cell parses as a float becomes `Float64`, anything else stays
//! text; empty cells are null either way.

use csv::StringRecord;
use polars::prelude::{Column, DataFrame};
use tracing::debug;

use crate::constants::{FIELD_SEPARATOR, SYNTHETIC_COLUMN_PREFIX};
use crate::error::Result;
use crate::sections::columns::standardize_column_names;

/// Parse one section body into a rectangular table.
///
/// The first body line is the header. Returns `Ok(None)` when the body has
/// no parsable content at all (the section is then skipped by the
/// splitter). `standardize` applies the column-name canonicalization used
/// for per-reactor sections.
pub fn parse_section_table(body: &[&str], standardize: bool) -> Result<Option<DataFrame>> {
    let records = read_records(body)?;
    let Some((header_record, data_records)) = records.split_first() else {
        return Ok(None);
    };

    let mut header = unique_header_names(header_record);
    if standardize {
        header = standardize_column_names(&header);
    }

    let max_row_len = data_records.iter().map(StringRecord::len).max().unwrap_or(0);
    if max_row_len > header.len() {
        debug!(
            "ragged section body: {} header columns, widest row has {}; recovering",
            header.len(),
            max_row_len
        );
        return parse_irregular_table(header, data_records, max_row_len).map(Some)
    }

    build_dataframe(&header, data_records).map(Some)
}

/// Recover a table whose rows are wider than its header.
///
/// Two passes: the caller has already measured `max_row_len` over the full
/// body, so the header can be finalized here with `unknown1..unknownK`
/// appended before any row is materialized. Every output row has exactly
/// `max_row_len` columns.
fn parse_irregular_table(
    mut header: Vec<String>,
    data_records: &[StringRecord],
    max_row_len: usize,
) -> Result<DataFrame> {
    let shortfall = max_row_len - header.len();
    for i in 1..=shortfall {
        header.push(format!("{SYNTHETIC_COLUMN_PREFIX}{i}"));
    }
    build_dataframe(&header, data_records)
}

/// Run a quote-aware, semicolon-delimited reader over the body lines.
fn read_records(body: &[&str]) -> Result<Vec<StringRecord>> {
    let joined = body.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_SEPARATOR)
        .has_headers(false)
        .flexible(true)
        .from_reader(joined.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }
    Ok(records)
}

/// Materialize rows against a finalized header; short rows are padded with
/// nulls.
fn build_dataframe(header: &[String], data_records: &[StringRecord]) -> Result<DataFrame> {
    let columns = header
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let cells: Vec<Option<&str>> = data_records
                .iter()
                .map(|record| record.get(index).filter(|cell| !cell.is_empty()))
                .collect();
            infer_column(name, &cells)
        })
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

/// Build one typed column from raw cells.
fn infer_column(name: &str, cells: &[Option<&str>]) -> Column {
    let mut floats = Vec::with_capacity(cells.len());
    for cell in cells {
        match cell {
            None => floats.push(None),
            Some(value) => match value.trim().parse::<f64>() {
                Ok(parsed) => floats.push(Some(parsed)),
                Err(_) => {
                    let strings: Vec<Option<String>> = cells
                        .iter()
                        .map(|cell| cell.map(str::to_string))
                        .collect();
                    return Column::new(name.into(), strings);
                }
            },
        }
    }
    Column::new(name.into(), floats)
}

/// Make header names usable as table columns: empty fields get a
/// pandas-style placeholder, repeated names get a positional suffix.
fn unique_header_names(header: &StringRecord) -> Vec<String> {
    let mut names = Vec::with_capacity(header.len());
    for (index, field) in header.iter().enumerate() {
        let mut name = if field.is_empty() {
            format!("Unnamed: {index}")
        } else {
            field.to_string()
        };
        if names.contains(&name) {
            name = format!("{name}_{index}");
        }
        names.push(name);
    }
    names
}
