//! Aggregation of normalized records into the report tables.
//!
//! This module transforms a normalized record slice into:
//! - Per-cohort KPI summaries and contact-count mix
//! - Daily/cumulative and weekly sales series
//! - The series-by-year pivot
//!
//! The three consumers are independent reads of the same slice; none of
//! them mutates shared state.

pub mod cohort;
pub mod pivot;
pub mod temporal;

// Re-export main functions
pub use cohort::{cohort_kpis, contact_mix};
pub use pivot::series_year_breakdown;
pub use temporal::{align_to_reference, daily_volume, weekly_volume};

use crate::normalizer::schema::{Report, SaleRecord};
use crate::utils::config::SCHEMA_VERSION;

/// Static configuration for one report build
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Input the records came from (recorded in the report)
    pub source: String,

    /// Attach the calendar-alignment projection to the daily series
    pub align_dates: bool,
}

/// Assemble the full report from one normalized record slice
///
/// **Public** - runs all aggregates over the same input
///
/// All tables are computed here so a report is always internally
/// consistent: either every table reflects the input slice, or no report
/// exists at all.
pub fn build_report(records: &[SaleRecord], opts: &ReportOptions) -> Report {
    Report {
        version: SCHEMA_VERSION.to_string(),
        source: opts.source.clone(),
        record_count: records.len() as u64,
        date_aligned: opts.align_dates,
        cohort_kpis: cohort_kpis(records),
        contact_mix: contact_mix(records),
        daily_volume: daily_volume(records, opts.align_dates),
        weekly_volume: weekly_volume(records),
        series_breakdown: series_year_breakdown(records),
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}
