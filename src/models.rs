//! Core data structures for DASGIP processing.
//!
//! Defines the section dictionary and culture-data-frame aliases plus the
//! statistics reported after a batch run.

use polars::prelude::DataFrame;
use std::collections::{BTreeMap, HashMap};

/// One archive's sections, keyed by (disambiguated) section name.
pub type DasDict = HashMap<String, DataFrame>;

/// Per-reactor merged culture data frames, keyed by reactor number.
///
/// A `BTreeMap` keeps reactors in numeric order so exports are
/// deterministic.
pub type CdfDict = BTreeMap<u32, DataFrame>;

/// Statistics for reporting across a batch run
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of zip archives discovered in the input directory
    pub archives_found: usize,
    /// Number of archives extracted and exported successfully
    pub archives_processed: usize,
    /// Number of archives that failed with a fatal per-archive error
    pub archives_failed: usize,
    /// Total reactor tables written across all archives
    pub reactors_exported: usize,
    /// Wall-clock duration of the run
    pub processing_time: std::time::Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_default_is_zeroed() {
        let stats = ProcessingStats::default();
        assert_eq!(stats.archives_found, 0);
        assert_eq!(stats.archives_processed, 0);
        assert_eq!(stats.archives_failed, 0);
        assert_eq!(stats.reactors_exported, 0);
    }
}
