//! Command implementations for the DASGIP processor CLI

use tracing::debug;

use crate::cli::args::{Commands, ProcessArgs};
use crate::config::{ExportFormat, ExtractorConfig, TextEncoding};
use crate::error::Result;
use crate::models::ProcessingStats;
use crate::processor::BatchProcessor;

/// Dispatch to the subcommand handler.
pub fn run(command: Commands) -> Result<ProcessingStats> {
    match command {
        Commands::Process(process_args) => run_process(process_args),
    }
}

fn run_process(args: ProcessArgs) -> Result<ProcessingStats> {
    setup_logging(args.verbose);

    // Validate configuration before touching any archive, so an
    // unsupported format produces no partial output.
    let config = build_config(&args)?;

    BatchProcessor::new(args.input_dir, config)
        .with_output_dir(args.output_dir)
        .run()
}

fn build_config(args: &ProcessArgs) -> Result<ExtractorConfig> {
    let export_format: ExportFormat = args.format.parse()?;
    let encoding: TextEncoding = args.encoding.parse()?;

    Ok(ExtractorConfig {
        member_pattern: args.member_pattern.clone(),
        encoding,
        strict: !args.lenient,
        export_format,
    })
}

/// Set up structured logging to stderr.
fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dasgip_processor={log_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {log_level}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DasError;

    fn process_args(format: &str) -> ProcessArgs {
        ProcessArgs {
            input_dir: ".".into(),
            output_dir: None,
            format: format.to_string(),
            member_pattern: "Control.csv".to_string(),
            encoding: "ansi".to_string(),
            lenient: false,
            verbose: false,
        }
    }

    #[test]
    fn config_is_built_from_process_args() {
        let config = build_config(&process_args("csv")).unwrap();
        assert_eq!(config.export_format, ExportFormat::Csv);
        assert_eq!(config.encoding, TextEncoding::Ansi);
        assert!(config.strict);
    }

    #[test]
    fn unsupported_format_is_a_configuration_error() {
        let err = build_config(&process_args("parquet")).unwrap_err();
        assert!(matches!(err, DasError::Configuration { .. }));
    }

    #[test]
    fn lenient_flag_disables_strict_attribution() {
        let mut args = process_args("csv");
        args.lenient = true;
        let config = build_config(&args).unwrap();
        assert!(!config.strict);
    }
}
