//! Section splitting for the DASGIP culture log.
//!
//! The culture log is a single text blob of blank-line-separated sections.
//! Each section starts with a name line (wrapped in brackets/quotes) and
//! continues with a semicolon-delimited table. Section names are not
//! unique across the whole document: the sections of a numbered setup
//! block (`Setup1` .. `Profiles`) recur once per physical setup, so every
//! section inside an open block gets the block's numeric suffix appended
//! before it is stored.

pub mod columns;
pub mod table;

use tracing::{debug, warn};

use crate::constants::{
    LINE_DELIMITER, PROFILES_PREFIX, SECTION_DELIMITER, SETUPS_SECTION, SETUP_PREFIX,
    TRACKDATA_PREFIX,
};
use crate::error::Result;
use crate::models::DasDict;

/// Tracks the currently open numbered setup block while splitting.
///
/// Threaded explicitly through the splitter; there is no module-level
/// state.
#[derive(Debug, Default)]
struct SetupState {
    in_setup: bool,
    suffix: String,
}

/// Split the decoded culture log into one table per named section.
///
/// Sections with no data are skipped. Ragged sections are recovered via
/// [`table::parse_section_table`]. `TrackData*` sections get canonical
/// column names. Splitting well-formed input is idempotent.
pub fn split_sections(raw: &str) -> Result<DasDict> {
    let mut dasdict = DasDict::new();
    let mut state = SetupState::default();

    for section in raw.split(SECTION_DELIMITER) {
        let section = section.trim_start();
        let mut lines = section.split(LINE_DELIMITER);
        let Some(name_line) = lines.next() else {
            continue;
        };
        let raw_name = name_line.trim_matches(['[', '"', ']']);
        if raw_name.is_empty() {
            continue;
        }

        let name = disambiguate(raw_name, &mut state);
        let body: Vec<&str> = lines.collect();

        let is_reactor_section = name.starts_with(TRACKDATA_PREFIX);
        match table::parse_section_table(&body, is_reactor_section)? {
            Some(section_table) => {
                dasdict.insert(name, section_table);
            }
            None => {
                debug!("section '{name}' has no data; skipped");
            }
        }
    }

    Ok(dasdict)
}

/// Resolve the stored name for one section, updating the setup-block
/// state.
///
/// A `Setup<N>` section opens a block; a `Profiles*` section closes it.
/// If a new `Setup<N>` opens while another block is still open (its
/// `Profiles` section was never seen), the previous block's suffix is
/// reused and its entries are overwritten. That last-write-wins fallback
/// is a known limitation of the format handling, kept deliberately; the
/// warning records that the output for such a file is not guaranteed.
fn disambiguate(raw_name: &str, state: &mut SetupState) -> String {
    let opens_setup_block = raw_name.starts_with(SETUP_PREFIX)
        && raw_name != SETUPS_SECTION
        && raw_name.ends_with(|c: char| c.is_ascii_digit());

    let name = if opens_setup_block {
        if state.in_setup {
            warn!(
                "new '{raw_name}' section opened before the previous setup block was closed \
                 (no '{PROFILES_PREFIX}' section seen); reusing suffix '{}' and overwriting \
                 earlier entries",
                state.suffix
            );
            let stem = &raw_name[..raw_name.len() - 1];
            format!("{stem}{}", state.suffix)
        } else {
            state.suffix = raw_name[raw_name.len() - 1..].to_string();
            state.in_setup = true;
            raw_name.to_string()
        }
    } else if state.in_setup {
        format!("{raw_name}{}", state.suffix)
    } else {
        raw_name.to_string()
    };

    if raw_name.starts_with(PROFILES_PREFIX) {
        state.in_setup = false;
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crlf(sections: Vec<Vec<&str>>) -> String {
        sections
            .iter()
            .map(|lines| lines.join("\r\n"))
            .collect::<Vec<_>>()
            .join("\r\n\r\n")
    }

    #[test]
    fn splits_named_sections_into_tables() {
        let raw = crlf(vec![
            vec!["[\"Info\"]", "Key;Value", "Version;5"],
            vec!["[\"Events\"]", "Timestamp;Description", "01.02.2021 10:00:00;Started"],
        ]);

        let dasdict = split_sections(&raw).unwrap();
        assert_eq!(dasdict.len(), 2);
        assert_eq!(dasdict["Info"].shape(), (1, 2));
        assert_eq!(dasdict["Events"].shape(), (1, 2));
    }

    #[test]
    fn sections_inside_setup_blocks_get_the_block_suffix() {
        let raw = crlf(vec![
            vec!["Setups", "Name", "A"],
            vec!["Setup1", "Key;Value", "k;1"],
            vec!["Device", "Key;Value", "d;1"],
            vec!["Profiles", "Key;Value", "p;1"],
            vec!["Setup2", "Key;Value", "k;2"],
            vec!["Device", "Key;Value", "d;2"],
            vec!["Profiles", "Key;Value", "p;2"],
        ]);

        let dasdict = split_sections(&raw).unwrap();
        let mut keys: Vec<&str> = dasdict.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "Device1", "Device2", "Profiles1", "Profiles2", "Setup1", "Setup2", "Setups"
            ]
        );
    }

    #[test]
    fn reopened_setup_block_overwrites_with_a_warning() {
        // Setup2 opens before Setup1's Profiles section was seen: the old
        // suffix is reused and earlier entries are overwritten.
        let raw = crlf(vec![
            vec!["Setup1", "Key;Value", "k;1"],
            vec!["Device", "Key;Serial", "d;first"],
            vec!["Setup2", "Key;Value", "k;2"],
            vec!["Device", "Key;Serial", "d;second"],
        ]);

        let dasdict = split_sections(&raw).unwrap();
        let mut keys: Vec<&str> = dasdict.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["Device1", "Setup1"]);
        assert_eq!(
            dasdict["Device1"].column("Serial").unwrap().str().unwrap().get(0),
            Some("second")
        );
    }

    #[test]
    fn empty_sections_are_skipped() {
        let raw = crlf(vec![
            vec!["Empty"],
            vec!["Info", "Key;Value", "Version;5"],
        ]);

        let dasdict = split_sections(&raw).unwrap();
        assert_eq!(dasdict.len(), 1);
        assert!(dasdict.contains_key("Info"));
    }

    #[test]
    fn trackdata_sections_get_canonical_column_names() {
        let raw = crlf(vec![vec![
            "[TrackData1]",
            "Timestamp;Unit 1.InoculationTime [];Unit 1.pH.PV [pH]",
            "01.02.2021 10:00:00;0.0;7.0",
        ]]);

        let dasdict = split_sections(&raw).unwrap();
        let names: Vec<String> = dasdict["TrackData1"]
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["Timestamp", "InoculationTime []", "pH.PV [pH]"]);
    }

    #[test]
    fn splitting_is_idempotent_on_well_formed_input() {
        let raw = crlf(vec![
            vec!["Setup1", "Key;Value", "k;1"],
            vec!["Device", "Key;Value", "d;1"],
            vec!["Profiles", "Key;Value", "p;1"],
            vec!["Events", "Timestamp;Description", "01.02.2021 10:00:00;Started"],
        ]);

        let first = split_sections(&raw).unwrap();
        let second = split_sections(&raw).unwrap();

        let mut first_keys: Vec<&String> = first.keys().collect();
        let mut second_keys: Vec<&String> = second.keys().collect();
        first_keys.sort_unstable();
        second_keys.sort_unstable();
        assert_eq!(first_keys, second_keys);
        for key in first_keys {
            assert_eq!(first[key], second[key]);
        }
    }
}
