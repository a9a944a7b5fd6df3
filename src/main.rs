//! Campaign Compare CLI
//!
//! Derives comparable performance metrics across outbound campaign
//! cohorts: per-year KPIs, daily/weekly/cumulative sales series, and
//! series-by-year pivots, written as a versioned JSON report.

use anyhow::Result;
use campaign_compare::commands::{execute_analyze, validate_args, AnalyzeArgs};
use campaign_compare::utils::config::SCHEMA_VERSION;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// Campaign Compare - cohort benchmarking for outbound campaigns
#[derive(Parser, Debug)]
#[command(name = "campaign-compare")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full pipeline over an input file
    Analyze {
        /// Input file (.csv, or .zip of CSV entries)
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Cohort labels to keep, comma-separated (default: all)
        #[arg(long, value_delimiter = ',')]
        years: Option<Vec<String>>,

        /// Series labels to keep, comma-separated (default: all)
        #[arg(long, value_delimiter = ',')]
        series: Option<Vec<String>>,

        /// Overlay cohorts on a shared month-day timeline
        #[arg(long)]
        align: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            years,
            series,
            align,
            summary,
        } => {
            let args = AnalyzeArgs {
                input,
                output_json: output,
                years,
                series,
                align_dates: align,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a report JSON file
///
/// **Private** - internal command implementation
fn validate_report_file(file_path: PathBuf) -> Result<()> {
    use campaign_compare::output::read_report;

    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version:      {}", report.version);
    println!("  Source:       {}", report.source);
    println!("  Records:      {}", report.record_count);
    println!("  Cohorts:      {}", report.cohort_kpis.len());
    println!("  Daily rows:   {}", report.daily_volume.len());
    println!("  Weekly rows:  {}", report.weekly_volume.len());
    println!("  Pivot rows:   {}", report.series_breakdown.len());

    Ok(())
}

/// Display schema information
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("Campaign Compare Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  source: string           - Input file the report came from");
        println!("  record_count: number     - Records after filtering");
        println!("  date_aligned: boolean    - Whether plot_date is present");
        println!("  cohort_kpis: array       - Per-cohort KPI summary");
        println!("    total_sales, avg_contacts, avg_days_to_close,");
        println!("    median_days_to_close, zero_touch_count, pct_zero_touch");
        println!("  contact_mix: array       - Contact-count buckets per cohort");
        println!("  daily_volume: array      - Daily sales with cumulative totals");
        println!("  weekly_volume: array     - Week-ending sales counts");
        println!("  series_breakdown: array  - Series-by-year pivot");
        println!("  generated_at: string     - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Campaign Compare v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Cohort benchmarking for outbound campaign sale records.");
}
