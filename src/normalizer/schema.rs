//! Typed record and report schema definitions.
//!
//! `SaleRecord` is the validated, immutable form every aggregate consumes.
//! The `Report` structs define the JSON we write to disk; the schema is
//! versioned to allow future evolution.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One converted sale, normalized from a raw input row
///
/// Records are constructed once per pipeline invocation and immutable
/// thereafter. An unparseable close date is kept as `None` (the unknown-date
/// marker): the record still counts toward cohort and series aggregates but
/// is excluded from every date-keyed series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Unique customer identifier
    pub customer_no: String,

    /// Cohort label, always a non-empty string (never numeric)
    pub campaign_year: String,

    /// Sub-campaign identifier within a year
    pub campaign_series: String,

    /// Close timestamp; `None` means the raw value would not parse
    pub plan_close_dt: Option<NaiveDateTime>,

    /// Secondary order timestamp; preserved, unused by current aggregates
    pub order_dt: Option<NaiveDateTime>,

    /// Raw lifecycle label at the moment of closure
    pub previous_step_at_closure: String,

    /// Ordinal outreach touches before closure, derived from the stage table (0-5)
    pub contact_count: u8,

    /// Days from first touch to close; `None` if the cell would not parse
    pub days_to_plan_close: Option<f64>,
}

impl SaleRecord {
    /// Calendar date of the close, for daily aggregation
    pub fn close_date(&self) -> Option<NaiveDate> {
        self.plan_close_dt.map(|dt| dt.date())
    }
}

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Input file the report was derived from
    pub source: String,

    /// Records remaining after caller-side filters
    pub record_count: u64,

    /// Whether the daily series carries the calendar-alignment projection
    pub date_aligned: bool,

    /// Per-cohort KPI summary, ordered by cohort label
    pub cohort_kpis: Vec<CohortKpiRow>,

    /// Per-cohort contact-count distribution
    pub contact_mix: Vec<ContactMixRow>,

    /// Daily sales with per-cohort cumulative totals
    pub daily_volume: Vec<DailyVolumeRow>,

    /// Week-ending sales counts
    pub weekly_volume: Vec<WeeklyVolumeRow>,

    /// Series-by-year breakdown
    pub series_breakdown: Vec<SeriesYearRow>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// KPI summary for one campaign-year cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortKpiRow {
    pub campaign_year: String,

    /// Count of sales in the cohort
    pub total_sales: u64,

    /// Mean contact count across the cohort
    pub avg_contacts: f64,

    /// Mean days-to-close (records with an unparseable value are skipped)
    pub avg_days_to_close: f64,

    /// Median days-to-close (even-sized samples average the two middle values)
    pub median_days_to_close: f64,

    /// Sales closed with zero prior contacts
    pub zero_touch_count: u64,

    /// `zero_touch_count / total_sales * 100`; 0 when the cohort is empty
    pub pct_zero_touch: f64,
}

/// One contact-count bucket within one cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMixRow {
    pub campaign_year: String,
    pub contact_count: u8,
    pub sales: u64,

    /// Share of the cohort's sales in this bucket (percent)
    pub pct_of_cohort: f64,
}

/// Sales count for one cohort on one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyVolumeRow {
    pub campaign_year: String,

    /// Actual close date
    pub close_date: NaiveDate,

    /// Close date reprojected onto the alignment reference year
    /// (present only when alignment is enabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_date: Option<NaiveDate>,

    /// Sales closed on this date
    pub daily_sales: u64,

    /// Running total for the cohort, in date order
    pub cumulative_sales: u64,
}

/// Sales count for one week-ending bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyVolumeRow {
    /// Final day (Sunday) of the ISO week the bucket covers
    pub week_ending: NaiveDate,

    /// Sales closed during the week
    pub sales: u64,
}

/// Grouped statistics for one (series, year) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesYearRow {
    pub campaign_series: String,
    pub campaign_year: String,

    /// Sales count for the pair
    pub sales_count: u64,

    /// Mean contact count for the pair
    pub avg_contacts: f64,
}
