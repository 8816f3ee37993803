//! kickfilter CLI - crowdfunding dump to JSON and CSV reports
//!
//! ```bash
//! kickfilter filter                                    # default file names
//! kickfilter filter dump.jsonl out.json out.csv        # filter + both reports
//! kickfilter export out.json out.csv                   # JSON report to CSV
//! ```

use clap::{Parser, Subcommand};
use kickfilter::{export_json_to_csv, filter_projects, FilterOptions, RunLog};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kickfilter")]
#[command(about = "Select successful Technology projects from a crowdfunding dump", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a JSONL dump and write JSON and CSV reports
    Filter {
        /// Input JSONL dump
        #[arg(default_value = "kickstarter_dataset.json")]
        input: PathBuf,

        /// JSON report
        #[arg(default_value = "filtered_kickstarter_projects.json")]
        json_output: PathBuf,

        /// CSV report
        #[arg(default_value = "kickstarter_projects_FINAL.csv")]
        csv_output: PathBuf,
    },

    /// Convert a JSON report to CSV
    Export {
        /// Input JSON report (array of records)
        #[arg(default_value = "filtered_kickstarter_projects.json")]
        input: PathBuf,

        /// CSV output
        #[arg(default_value = "kickstarter_projects.csv")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let mut log = RunLog::stdout();

    let result = match cli.command {
        Commands::Filter {
            input,
            json_output,
            csv_output,
        } => cmd_filter(&input, &json_output, &csv_output, &mut log),

        Commands::Export { input, output } => cmd_export(&input, &output, &mut log),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_filter(
    input: &Path,
    json_output: &Path,
    csv_output: &Path,
    log: &mut RunLog,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Processing: {}", input.display());

    let summary = filter_projects(input, json_output, csv_output, &FilterOptions::default(), log)?;

    eprintln!(
        "\n✨ Done! {} of {} projects selected",
        summary.successful, summary.total_processed
    );
    Ok(())
}

fn cmd_export(input: &Path, output: &Path, log: &mut RunLog) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Converting: {}", input.display());

    export_json_to_csv(input, output, log)?;

    eprintln!("\n✨ Done!");
    Ok(())
}
