//! Per-reactor merging of time series and event log.
//!
//! Every `TrackData<N>` section is one reactor's time series. Its events
//! are the `Events` rows whose `Reference` mentions `Unit <N>` (plus, in
//! lenient mode, rows referencing no reactor at all). Series and events
//! are full-outer-joined on the raw `Timestamp` key, ordered by the parsed
//! timestamp, and the `InoculationTime []` column is recomputed as a
//! signed duration in fractional hours.

use chrono::NaiveDateTime;
use polars::prelude::*;
use tracing::warn;

use crate::constants::{
    EVENTS_SECTION, INOCULATION_TIME_COLUMN, REFERENCE_COLUMN, TIMESTAMP_FORMATS,
    TIMESTAMP_COLUMN, TRACKDATA_PREFIX,
};
use crate::error::{DasError, Result};
use crate::events::extract_volume_changes;
use crate::models::{CdfDict, DasDict};

/// Transient key used to order merged rows; dropped before returning.
const SORT_KEY: &str = "__timestamp_order";

/// Merge the event log into every reactor's time series.
///
/// Fails when the section dictionary has no `Events` section. With
/// `strict` set, only events explicitly referencing the reactor are
/// merged; otherwise reactor-unspecific events are merged into every
/// reactor as well.
pub fn build_cdf_dict(dasdict: &DasDict, strict: bool) -> Result<CdfDict> {
    let events_raw = dasdict
        .get(EVENTS_SECTION)
        .ok_or_else(|| DasError::MissingSection {
            section: EVENTS_SECTION.to_string(),
        })?;
    let events = extract_volume_changes(events_raw)?;

    let mut cdf_dict = CdfDict::new();
    for (section_name, reactor_data) in dasdict {
        if !section_name.starts_with(TRACKDATA_PREFIX) {
            continue;
        }
        let Some(reactor_number) = section_name
            .chars()
            .last()
            .filter(char::is_ascii_digit)
            .and_then(|digit| digit.to_digit(10))
        else {
            warn!("section '{section_name}' has no trailing reactor number; skipped");
            continue;
        };

        let reactor_events = filter_reactor_events(&events, reactor_number, strict)?;
        let merged = merge_ordered(reactor_data, &reactor_events)?;
        let merged = recompute_inoculation_time(merged, None)?;
        cdf_dict.insert(reactor_number, merged);
    }

    Ok(cdf_dict)
}

/// Select the event rows attributable to one reactor.
fn filter_reactor_events(events: &DataFrame, reactor_number: u32, strict: bool) -> Result<DataFrame> {
    let needle = format!("Unit {reactor_number}");
    let height = events.height();

    let mask: Vec<bool> = match events.column(REFERENCE_COLUMN) {
        Ok(references) => match references.str() {
            Ok(references) => references
                .into_iter()
                .map(|reference| match reference {
                    Some(reference) => reference.contains(&needle),
                    None => !strict,
                })
                .collect(),
            // an all-empty Reference column is typed as all-null floats:
            // every event is unattributed
            Err(_) => vec![!strict; height],
        },
        Err(_) => {
            warn!("events table has no '{REFERENCE_COLUMN}' column; events cannot be attributed");
            vec![!strict; height]
        }
    };

    let mask = BooleanChunked::from_slice("reactor_events".into(), &mask);
    Ok(events.filter(&mask)?)
}

/// Full outer join on the raw timestamp key, ordered by parsed timestamp.
///
/// Matching timestamps align; unmatched rows from either side survive
/// with nulls in the other side's columns. Rows whose timestamp cannot be
/// parsed sort last.
fn merge_ordered(reactor_data: &DataFrame, reactor_events: &DataFrame) -> Result<DataFrame> {
    let merged = reactor_data
        .clone()
        .lazy()
        .join(
            reactor_events.clone().lazy(),
            [col(TIMESTAMP_COLUMN)],
            [col(TIMESTAMP_COLUMN)],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        )
        .collect()?;

    sort_by_timestamp(merged)
}

fn sort_by_timestamp(mut merged: DataFrame) -> Result<DataFrame> {
    let order_keys: Option<Vec<Option<i64>>> = merged
        .column(TIMESTAMP_COLUMN)
        .ok()
        .and_then(|column| column.str().ok())
        .map(|timestamps| {
            timestamps
                .into_iter()
                .map(|value| {
                    value
                        .and_then(parse_timestamp)
                        .map(|instant| instant.and_utc().timestamp_millis())
                })
                .collect()
        });
    let Some(order_keys) = order_keys else {
        return Ok(merged);
    };

    merged.with_column(Column::new(SORT_KEY.into(), order_keys))?;
    let sorted = merged.sort(
        [SORT_KEY],
        SortMultipleOptions::default()
            .with_nulls_last(true)
            .with_maintain_order(true),
    )?;
    Ok(sorted.drop(SORT_KEY)?)
}

/// Recompute `InoculationTime []` as signed fractional hours.
fn recompute_inoculation_time(
    mut merged: DataFrame,
    inoculation_instant: Option<NaiveDateTime>,
) -> Result<DataFrame> {
    let hours = inoculation_hours(&merged, inoculation_instant);
    merged.with_column(Column::new(INOCULATION_TIME_COLUMN.into(), hours))?;
    Ok(merged)
}

/// Hours between each row's timestamp and the inoculation instant.
///
/// Without an explicit instant, the reference is the timestamp (first
/// column) of the first row whose third column (the source format's
/// per-row inoculation marker) is non-null. Pre-inoculation rows come
/// out negative; rows with unparseable timestamps stay null.
pub fn inoculation_hours(
    merged: &DataFrame,
    inoculation_instant: Option<NaiveDateTime>,
) -> Vec<Option<f64>> {
    let height = merged.height();
    let nulls = vec![None; height];

    if merged.width() < 3 && inoculation_instant.is_none() {
        warn!(
            "merged table has fewer than three columns; no inoculation marker to fall back on"
        );
        return nulls;
    }

    let columns = merged.get_columns();
    let timestamps: Vec<Option<NaiveDateTime>> = match columns[0].str() {
        Ok(values) => values
            .into_iter()
            .map(|value| value.and_then(parse_timestamp))
            .collect(),
        Err(_) => {
            warn!("first column holds no text timestamps; '{INOCULATION_TIME_COLUMN}' left null");
            return nulls;
        }
    };

    let reference = inoculation_instant.or_else(|| {
        let marker = &columns[2];
        (0..height)
            .find(|&row| matches!(marker.get(row), Ok(value) if value != AnyValue::Null))
            .and_then(|row| timestamps[row])
    });
    let Some(reference) = reference else {
        warn!("no usable inoculation marker found; '{INOCULATION_TIME_COLUMN}' left null");
        return nulls;
    };

    timestamps
        .iter()
        .map(|instant| {
            instant.map(|instant| (instant - reference).num_milliseconds() as f64 / 3_600_000.0)
        })
        .collect()
}

/// Parse one timestamp cell, trying the spellings of both format versions.
pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
