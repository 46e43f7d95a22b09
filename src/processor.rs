//! Batch driver for DASGIP archives.
//!
//! Discovers `*.zip` files, runs the extraction pipeline once per archive
//! and hands the result to the export glue. Archives are processed
//! start-to-finish one at a time; a fatal error in one archive is logged
//! with the archive's identity and never aborts the run.

use colored::Colorize;
use glob::glob;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

use crate::archive::read_archive_member;
use crate::config::ExtractorConfig;
use crate::constants::ARCHIVE_GLOB;
use crate::error::{DasError, Result};
use crate::export::export_cdf_dict;
use crate::merge::build_cdf_dict;
use crate::models::{CdfDict, ProcessingStats};
use crate::sections::split_sections;

/// Extract one archive into per-reactor merged culture data frames.
///
/// Pipeline: read and decode the culture log member, split it into
/// sections, merge the event log into every reactor's time series.
pub fn extract(archive_path: &Path, config: &ExtractorConfig) -> Result<CdfDict> {
    let raw = read_archive_member(archive_path, &config.member_pattern, config.encoding)?;
    let dasdict = split_sections(&raw)?;
    build_cdf_dict(&dasdict, config.strict)
}

/// Processes every archive found in one input directory.
#[derive(Debug)]
pub struct BatchProcessor {
    input_dir: PathBuf,
    output_dir: Option<PathBuf>,
    config: ExtractorConfig,
}

impl BatchProcessor {
    pub fn new(input_dir: PathBuf, config: ExtractorConfig) -> Self {
        Self {
            input_dir,
            output_dir: None,
            config,
        }
    }

    /// Redirect exports to a separate directory instead of writing next to
    /// each archive.
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Run the batch: discover, extract, export, report.
    pub fn run(&self) -> Result<ProcessingStats> {
        let start = Instant::now();

        if let Some(output_dir) = &self.output_dir {
            std::fs::create_dir_all(output_dir)?;
        }

        let archives = self.discover_archives()?;
        info!(
            "{} DASGIP zip files have been found. Proceeding to extraction.",
            archives.len()
        );

        let mut stats = ProcessingStats {
            archives_found: archives.len(),
            ..Default::default()
        };

        for archive_path in &archives {
            match self.process_archive(archive_path) {
                Ok(reactor_count) => {
                    stats.archives_processed += 1;
                    stats.reactors_exported += reactor_count;
                }
                Err(e) => {
                    stats.archives_failed += 1;
                    error!("failed to process {}: {e}", archive_path.display());
                }
            }
        }

        stats.processing_time = start.elapsed();
        self.report(&stats);
        Ok(stats)
    }

    fn discover_archives(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.input_dir.join(ARCHIVE_GLOB);
        let entries = glob(&pattern.to_string_lossy()).map_err(|e| DasError::Configuration {
            message: format!("invalid archive pattern '{}': {e}", pattern.display()),
        })?;

        let mut archives: Vec<PathBuf> = entries.filter_map(|entry| entry.ok()).collect();
        archives.sort();
        Ok(archives)
    }

    fn process_archive(&self, archive_path: &Path) -> Result<usize> {
        info!("extracting {}", archive_path.display());
        let cdf_dict = extract(archive_path, &self.config)?;

        let base = self.export_base(archive_path);
        let written = export_cdf_dict(&cdf_dict, &base, self.config.export_format)?;
        info!(
            "{} exported successfully as {} ({} file(s))",
            archive_path.display(),
            self.config.export_format,
            written.len()
        );
        Ok(cdf_dict.len())
    }

    /// Export base path: the archive path without its extension, moved
    /// into the output directory when one is set.
    fn export_base(&self, archive_path: &Path) -> PathBuf {
        match &self.output_dir {
            Some(output_dir) => {
                let stem = archive_path.file_stem().unwrap_or(archive_path.as_os_str());
                output_dir.join(stem)
            }
            None => archive_path.with_extension(""),
        }
    }

    fn report(&self, stats: &ProcessingStats) {
        println!("\n{}", "Extraction complete".bright_green().bold());
        println!(
            "  {} {} found, {} processed, {} failed",
            "Archives:".bright_cyan(),
            stats.archives_found,
            stats.archives_processed,
            stats.archives_failed
        );
        println!(
            "  {} {}",
            "Reactors:".bright_cyan(),
            stats.reactors_exported
        );
        println!(
            "  {} {:.2?}",
            "Elapsed:".bright_cyan(),
            stats.processing_time
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn discovery_finds_only_zip_files_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.zip"), b"x").unwrap();
        std::fs::write(dir.path().join("a.zip"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let processor =
            BatchProcessor::new(dir.path().to_path_buf(), ExtractorConfig::default());
        let archives = processor.discover_archives().unwrap();

        let names: Vec<_> = archives
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.zip", "b.zip"]);
    }

    #[test]
    fn export_base_strips_the_extension() {
        let processor =
            BatchProcessor::new(PathBuf::from("."), ExtractorConfig::default());
        assert_eq!(
            processor.export_base(Path::new("/data/culture7.zip")),
            PathBuf::from("/data/culture7")
        );
    }

    #[test]
    fn export_base_honors_the_output_dir() {
        let processor = BatchProcessor::new(PathBuf::from("."), ExtractorConfig::default())
            .with_output_dir(Some(PathBuf::from("/out")));
        assert_eq!(
            processor.export_base(Path::new("/data/culture7.zip")),
            PathBuf::from("/out/culture7")
        );
    }
}
