//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads the raw input bytes
//! 2. Normalizes them into typed records (via the load cache)
//! 3. Applies the caller-side cohort/series filters
//! 4. Builds the report tables
//! 5. Writes the report JSON
//!
//! The command layer plays the "presentation collaborator" role: the
//! set-membership filters live here, not in the aggregates, which always
//! receive an already-filtered slice.

use crate::aggregator::{build_report, ReportOptions};
use crate::ingest::table_from_bytes;
use crate::normalizer::cache;
use crate::normalizer::records::normalize_records;
use crate::normalizer::schema::SaleRecord;
use crate::output::write_report;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Input file (.csv or .zip)
    pub input: PathBuf,

    /// Output path for the JSON report
    pub output_json: PathBuf,

    /// Cohort labels to keep (None = keep all)
    pub years: Option<Vec<String>>,

    /// Series labels to keep (None = keep all)
    pub series: Option<Vec<String>>,

    /// Attach the calendar-alignment projection to the daily series
    pub align_dates: bool,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_json: PathBuf::from("report.json"),
            years: None,
            series: None,
            align_dates: false,
            print_summary: false,
        }
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Analyze command arguments
///
/// # Returns
/// Ok if the run yields a fully-formed report (or the explicit empty
/// state); Err with context if any step fails
///
/// # Errors
/// * Input read / decode failures
/// * Schema validation failures (missing required column)
/// * Report write failures
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.input.display());

    // Step 1/5: Read input bytes
    info!("Step 1/5: Reading input file...");
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read input file {}", args.input.display()))?;

    // Step 2/5: Normalize (memoized by content fingerprint)
    info!("Step 2/5: Normalizing records...");
    let fingerprint = cache::fingerprint(&bytes);
    let batch = match cache::fetch(&fingerprint) {
        Some(hit) => {
            info!("Load cache hit ({} records)", hit.records.len());
            hit
        }
        None => {
            let table = table_from_bytes(&bytes, &args.input)
                .context("Failed to decode input table")?;
            let batch = normalize_records(&table)
                .context("Input failed schema validation")?;
            cache::store(&fingerprint, batch)
        }
    };

    debug!(
        "Batch: {} rows in, {} close-date failures, {} unmapped stages",
        batch.stats.rows_in, batch.stats.close_date_failures, batch.stats.unmapped_stages
    );

    // Step 3/5: Apply caller-side filters
    info!("Step 3/5: Applying cohort/series filters...");
    let records = apply_filters(&batch.records, args.years.as_deref(), args.series.as_deref());

    if records.is_empty() {
        // Empty result set: a reportable state, not a fault. Nothing is
        // written so no partial output can exist.
        warn!("No records match the selected filters");
        println!("No data found for the selected filters.");
        return Ok(());
    }

    debug!("{} of {} records selected", records.len(), batch.records.len());

    // Step 4/5: Build report tables
    info!("Step 4/5: Building report tables...");
    let report = build_report(
        &records,
        &ReportOptions {
            source: args.input.display().to_string(),
            align_dates: args.align_dates,
        },
    );

    // Step 5/5: Write output
    info!("Step 5/5: Writing report...");
    write_report(&report, &args.output_json).context("Failed to write report JSON")?;

    info!("✓ Report written to: {}", args.output_json.display());

    if args.print_summary {
        print_summary(&report);
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Keep records whose cohort and series labels are in the selected sets
///
/// **Public** - the collaborator-side set-membership filter; `None` means
/// no filter on that dimension
pub fn apply_filters(
    records: &[SaleRecord],
    years: Option<&[String]>,
    series: Option<&[String]>,
) -> Vec<SaleRecord> {
    records
        .iter()
        .filter(|r| years.map_or(true, |ys| ys.iter().any(|y| *y == r.campaign_year)))
        .filter(|r| series.map_or(true, |ss| ss.iter().any(|s| *s == r.campaign_series)))
        .cloned()
        .collect()
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    let ext = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if ext != "csv" && ext != "zip" {
        anyhow::bail!("Input must be a .csv or .zip file, got: {}", args.input.display());
    }

    if args.output_json.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if let Some(years) = &args.years {
        if years.is_empty() {
            anyhow::bail!("--years was given but no labels were provided");
        }
    }
    if let Some(series) = &args.series {
        if series.is_empty() {
            anyhow::bail!("--series was given but no labels were provided");
        }
    }

    Ok(())
}

/// Print the text summary block
fn print_summary(report: &crate::normalizer::schema::Report) {
    println!("\n{}", "=".repeat(80));
    println!("CAMPAIGN COMPARISON SUMMARY");
    println!("{}", "=".repeat(80));
    println!("Source:       {}", report.source);
    println!("Records:      {}", report.record_count);
    println!("Cohorts:      {}", report.cohort_kpis.len());
    println!("Date aligned: {}", report.date_aligned);
    println!();
    for kpi in &report.cohort_kpis {
        println!(
            "{}: {} sales, {:.2} avg contacts, {:.1} avg days to close, {:.1}% zero-touch",
            kpi.campaign_year,
            kpi.total_sales,
            kpi.avg_contacts,
            kpi.avg_days_to_close,
            kpi.pct_zero_touch
        );
    }
    println!("{}", "=".repeat(80));
}
