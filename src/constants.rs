//! Application constants for the DASGIP processor
//!
//! This module contains the section markers, column names, and
//! version-mapping tables used throughout the application.

// =============================================================================
// Archive and Section Structure
// =============================================================================

/// Substring identifying the culture log member inside a DASGIP zip export
pub const DEFAULT_MEMBER_PATTERN: &str = "Control.csv";

/// Sections are separated by a blank line in the CRLF-terminated source
pub const SECTION_DELIMITER: &str = "\r\n\r\n";

/// Line terminator inside a section
pub const LINE_DELIMITER: &str = "\r\n";

/// Field separator used by all sections
pub const FIELD_SEPARATOR: u8 = b';';

/// Sections holding one reactor's time series are named `TrackData<N>`
pub const TRACKDATA_PREFIX: &str = "TrackData";

/// Name of the manually-logged event section
pub const EVENTS_SECTION: &str = "Events";

/// Prefix of the sections opening a numbered setup block
pub const SETUP_PREFIX: &str = "Setup";

/// The `Setups` overview section is not a setup block despite the prefix
pub const SETUPS_SECTION: &str = "Setups";

/// The `Profiles` section closes the current setup block
pub const PROFILES_PREFIX: &str = "Profiles";

/// Name given to overflow columns recovered from ragged section bodies
pub const SYNTHETIC_COLUMN_PREFIX: &str = "unknown";

// =============================================================================
// Event Log Columns
// =============================================================================

/// Free-text event messages describing manual volume changes start with this
pub const VOLUME_CHANGE_PREFIX: &str = "Added volume";

/// The volume magnitude sits between fixed offsets in the message template,
/// e.g. `Added volume ` + number + ` mL added ...`. The template is assumed
/// constant; see the merge engine for the columns derived from it.
pub const VOLUME_PREFIX_LEN: usize = 13;
pub const VOLUME_SUFFIX_LEN: usize = 13;

pub const VOL_ADDED_COLUMN: &str = "Vol_added";
pub const VOL_REMOVED_COLUMN: &str = "Vol_removed";
pub const LIQUID_ADDED_COLUMN: &str = "Liquid_added";
pub const FEED_PUMP_COLUMN: &str = "Feed_pump";
pub const FEED_BALANCE_COLUMN: &str = "Feed_balance";

pub const DESCRIPTION_COLUMN: &str = "Description";
pub const REFERENCE_COLUMN: &str = "Reference";
pub const TIMESTAMP_COLUMN: &str = "Timestamp";
pub const INOCULATION_TIME_COLUMN: &str = "InoculationTime []";

// =============================================================================
// Column Name Canonicalization
// =============================================================================

/// Ordered rewrite rules stripping reactor-unit references and
/// format-version digit artifacts from column names.
///
/// Applied before [`V4_TO_V5_COLUMNS`]; reactor units 1-9 only.
pub const COLUMN_REWRITE_RULES: &[(&str, &str)] = &[
    (r"Unit [0-9]\.", ""),
    (r"\s?[0-9]\.", "."),
    (r"[0-9]\s\[", " ["),
];

/// Measurement names that changed between v4 and v5 of the controller
/// software. Keys are the v4 spellings (after the rewrite rules ran),
/// values the v5 canonical form. Supporting another software version is a
/// matter of extending this table.
pub const V4_TO_V5_COLUMNS: &[(&str, &str)] = &[
    ("Inoculation Time []", "InoculationTime []"),
    ("pH.Out []", "pH.Out [%]"),
    ("CTR [mM/h]", "CTR.PV [mMol/h]"),
    ("RQ []", "RQ.PV []"),
    ("AU []", "ODAU.PV []"),
    ("CX []", "ODCX.PV []"),
    ("Level.PV [µS]", "Lvl.PV [µS]"),
    ("MA.PV [g]", "BalA.MPV [g]"),
    ("MB.PV [g]", "BalB.MPV [g]"),
    ("Torque.PV [mNm]", "N.TStirPV [mNm]"),
    ("Offline.A []", "OfflineA.OfflineA []"),
    ("Offline.B []", "OfflineB.OfflineB []"),
    ("Offline.C []", "OfflineC.OfflineC []"),
    ("Offline.D []", "OfflineD.OfflineD []"),
    ("OTR [mM/h]", "OTR.PV [mMol/h]"),
    ("V.PV [mL]", "V.VPV [mL]"),
];

// =============================================================================
// Timestamp Formats
// =============================================================================

/// Timestamp spellings observed across v4 and v5 exports, tried in order.
pub const TIMESTAMP_FORMATS: &[&str] = &[
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

// =============================================================================
// Export
// =============================================================================

/// Archive discovery pattern used by the batch driver
pub const ARCHIVE_GLOB: &str = "*.zip";

/// Supported export formats, for user-facing error messages
pub const EXPORT_FORMATS: &[&str] = &["csv", "xlsx"];
