//! Volume-change extraction from the manual event log.
//!
//! Manual volume additions and removals only exist as free-text messages
//! in the `Events` section. Messages follow a fixed template: the literal
//! prefix `Added volume `, the signed magnitude, and a fixed-width unit
//! trailer. The magnitude sits between byte offsets 13 and len-13; the
//! template is assumed constant, so the offsets are applied literally
//! rather than via a grammar.

use polars::prelude::{Column, DataFrame};
use tracing::warn;

use crate::constants::{
    DESCRIPTION_COLUMN, FEED_BALANCE_COLUMN, FEED_PUMP_COLUMN, LIQUID_ADDED_COLUMN,
    VOLUME_CHANGE_PREFIX, VOLUME_PREFIX_LEN, VOLUME_SUFFIX_LEN, VOL_ADDED_COLUMN,
    VOL_REMOVED_COLUMN,
};
use crate::error::Result;

/// Distribute logged volume changes into `Vol_added` / `Vol_removed`.
///
/// Rows whose `Description` does not match the template get null amounts.
/// `Liquid_added` is created for later enrichment (once the added solution
/// is specified, concentration changes become computable); `Feed_pump` and
/// `Feed_balance` are placeholders of the same kind. All three stay null
/// here.
pub fn extract_volume_changes(events: &DataFrame) -> Result<DataFrame> {
    let height = events.height();
    let mut added: Vec<Option<f64>> = vec![None; height];
    let mut removed: Vec<Option<f64>> = vec![None; height];

    match events.column(DESCRIPTION_COLUMN).ok().and_then(|c| c.str().ok()) {
        Some(descriptions) => {
            for (index, description) in descriptions.into_iter().enumerate() {
                let Some(description) = description else {
                    continue;
                };
                if !description.starts_with(VOLUME_CHANGE_PREFIX) {
                    continue;
                }
                match parse_magnitude(description) {
                    Some(volume) if volume >= 0.0 => added[index] = Some(volume),
                    Some(volume) => removed[index] = Some(volume.abs()),
                    None => warn!(
                        "volume-change message does not fit the fixed template: '{description}'"
                    ),
                }
            }
        }
        None => {
            if height > 0 {
                warn!(
                    "events table has no usable '{DESCRIPTION_COLUMN}' column; \
                     no volume changes extracted"
                );
            }
        }
    }

    let mut enriched = events.clone();
    enriched.with_column(Column::new(VOL_ADDED_COLUMN.into(), added))?;
    enriched.with_column(Column::new(
        LIQUID_ADDED_COLUMN.into(),
        vec![None::<f64>; height],
    ))?;
    enriched.with_column(Column::new(VOL_REMOVED_COLUMN.into(), removed))?;
    enriched.with_column(Column::new(
        FEED_PUMP_COLUMN.into(),
        vec![None::<f64>; height],
    ))?;
    enriched.with_column(Column::new(
        FEED_BALANCE_COLUMN.into(),
        vec![None::<f64>; height],
    ))?;

    Ok(enriched)
}

/// Cut the magnitude out of the fixed-width message and parse it.
fn parse_magnitude(description: &str) -> Option<f64> {
    if description.len() <= VOLUME_PREFIX_LEN + VOLUME_SUFFIX_LEN {
        return None;
    }
    description
        .get(VOLUME_PREFIX_LEN..description.len() - VOLUME_SUFFIX_LEN)
        .and_then(|slice| slice.trim().parse::<f64>().ok())
}
