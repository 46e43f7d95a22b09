use clap::Parser;
use dasgip_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    match commands::run(command) {
        Ok(_stats) => {
            // Success - the batch summary has already been reported
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {error}");
            process::exit(1);
        }
    }
}

/// Show help information when no subcommand is provided
fn show_help_and_commands() {
    println!("DASGIP Processor - Bioreactor Culture Data Extractor");
    println!("====================================================");
    println!();
    println!("Convert DASGIP controller zip exports into per-reactor culture data");
    println!("frames with the manual event log merged onto each time series.");
    println!();
    println!("USAGE:");
    println!("    dasgip-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Extract every zip archive in a directory (main command)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Extract all archives in the current directory to XLSX workbooks:");
    println!("    dasgip-processor process");
    println!();
    println!("    # Extract to per-reactor CSV files, including unattributed events:");
    println!("    dasgip-processor process --format csv --lenient");
    println!();
    println!("For detailed help, use:");
    println!("    dasgip-processor process --help");
}
