//! Column-name canonicalization for per-reactor sections.
//!
//! Raw `TrackData` headers reference the reactor unit (`Unit 1.`) and
//! carry digit artifacts that differ between v4 and v5 of the controller
//! software:
//!
//! ```text
//! (v4)  Unit 1.XCO2 1.Out [%]
//! (v5)  Unit 1.XCO21.Out [%]
//! (cdf) XCO2.Out [%]
//!
//! (v4)  Unit 1.Inoculation Time []
//! (v5)  Unit 1.InoculationTime []
//! (cdf) InoculationTime []
//! ```
//!
//! Both spellings collapse to one reactor-agnostic name so downstream code
//! can treat every reactor table uniformly. The rewrite rules only cover
//! single-digit unit numbers (reactors 1-9).

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::constants::{COLUMN_REWRITE_RULES, V4_TO_V5_COLUMNS};

static REWRITE_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    COLUMN_REWRITE_RULES
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("static rewrite pattern"),
                *replacement,
            )
        })
        .collect()
});

static V4_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| V4_TO_V5_COLUMNS.iter().copied().collect());

/// Canonicalize one column name.
pub fn standardize_column_name(name: &str) -> String {
    let mut standardized = name.to_string();
    for (pattern, replacement) in REWRITE_RULES.iter() {
        standardized = pattern.replace_all(&standardized, *replacement).into_owned();
    }
    match V4_LOOKUP.get(standardized.as_str()) {
        Some(v5_name) => (*v5_name).to_string(),
        None => standardized,
    }
}

/// Canonicalize a full header.
pub fn standardize_column_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|name| standardize_column_name(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_prefix_is_stripped() {
        assert_eq!(standardize_column_name("Unit 3.F.PV [sL/h]"), "F.PV [sL/h]");
    }

    #[test]
    fn v4_and_v5_spellings_collapse_to_the_same_name() {
        assert_eq!(
            standardize_column_name("Unit 1.XCO2 1.Out [%]"),
            "XCO2.Out [%]"
        );
        assert_eq!(
            standardize_column_name("Unit 1.XCO21.Out [%]"),
            "XCO2.Out [%]"
        );
    }

    #[test]
    fn digit_before_unit_bracket_is_dropped() {
        assert_eq!(standardize_column_name("XCO21 [%]"), "XCO2 [%]");
    }

    #[test]
    fn every_lookup_pair_yields_identical_canonical_output() {
        for (v4_name, v5_name) in V4_TO_V5_COLUMNS {
            let from_v4 = standardize_column_name(&format!("Unit 1.{v4_name}"));
            let from_v5 = standardize_column_name(&format!("Unit 1.{v5_name}"));
            assert_eq!(from_v4, from_v5, "v4 '{v4_name}' diverged from v5");
            assert_eq!(from_v4, *v5_name);
        }
    }

    #[test]
    fn unrelated_names_pass_through() {
        assert_eq!(standardize_column_name("Timestamp"), "Timestamp");
        assert_eq!(standardize_column_name("unknown1"), "unknown1");
    }

    #[test]
    fn all_reactor_units_map_to_one_header() {
        let headers: Vec<String> = (1..=9)
            .map(|unit| standardize_column_name(&format!("Unit {unit}.DO.PV [%DO]")))
            .collect();
        assert!(headers.iter().all(|name| name == "DO.PV [%DO]"));
    }
}
