//! Command-line argument definitions for the DASGIP processor
//!
//! Defines the CLI interface using the clap derive API. Format and
//! encoding are taken as plain strings and validated by the command
//! runner, so an unsupported value surfaces as a configuration error
//! before any archive is touched.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the DASGIP culture-data extractor
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dasgip-processor",
    version,
    about = "Convert DASGIP bioreactor zip exports into per-reactor culture data frames",
    long_about = "Parses the multi-section culture log inside DASGIP controller zip exports, \
                  merges the manually-logged volume events onto each reactor's time series and \
                  writes one normalized table per reactor, as CSV files or as one XLSX workbook \
                  per archive."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract every zip archive in a directory and export the reactor tables
    Process(ProcessArgs),
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Directory scanned for *.zip archives
    #[arg(
        short = 'i',
        long = "input",
        value_name = "DIR",
        default_value = ".",
        help = "Directory scanned for *.zip archives"
    )]
    pub input_dir: PathBuf,

    /// Directory for exported files
    ///
    /// Defaults to writing next to each archive.
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Export format: "csv" or "xlsx"
    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        default_value = "xlsx"
    )]
    pub format: String,

    /// Substring identifying the culture log member inside each archive
    #[arg(long = "pattern", value_name = "SUBSTRING", default_value = "Control.csv")]
    pub member_pattern: String,

    /// Text encoding of the culture log member: "ansi" or "utf8"
    #[arg(long = "encoding", value_name = "ENCODING", default_value = "ansi")]
    pub encoding: String,

    /// Also merge events that reference no specific reactor
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
