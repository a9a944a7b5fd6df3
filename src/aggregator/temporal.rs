//! Daily, cumulative, and weekly sales series.
//!
//! All series are built from the date-valid subset only: a record whose
//! close date is the unknown marker never contributes here (it still
//! counts toward the cohort and series aggregates).
//!
//! Series are sparse - dates and weeks with zero sales are not
//! synthesized.

use crate::normalizer::schema::{DailyVolumeRow, SaleRecord, WeeklyVolumeRow};
use crate::utils::config::ALIGNMENT_YEAR;
use chrono::{Datelike, NaiveDate, Weekday};
use log::debug;
use std::collections::BTreeMap;

/// Build the daily series with per-cohort running totals
///
/// **Public** - main entry point for the daily/cumulative view
///
/// # Arguments
/// * `records` - Normalized (and already filtered) record slice
/// * `align` - Attach the calendar-alignment projection to each row
///
/// # Returns
/// One row per (cohort, close date) present, ordered by cohort then date;
/// `cumulative_sales` is the running sum within the cohort in date order
pub fn daily_volume(records: &[SaleRecord], align: bool) -> Vec<DailyVolumeRow> {
    // BTreeMap keys are (year, date), so iteration is already in the
    // cohort-then-date order the running sum requires
    let mut counts: BTreeMap<(&str, NaiveDate), u64> = BTreeMap::new();
    for rec in records {
        if let Some(date) = rec.close_date() {
            *counts.entry((rec.campaign_year.as_str(), date)).or_default() += 1;
        }
    }

    debug!("Daily series: {} (cohort, date) buckets", counts.len());

    let mut rows = Vec::with_capacity(counts.len());
    let mut current_year: Option<&str> = None;
    let mut running = 0u64;

    for ((year, date), daily_sales) in counts {
        if current_year != Some(year) {
            current_year = Some(year);
            running = 0;
        }
        running += daily_sales;

        rows.push(DailyVolumeRow {
            campaign_year: year.to_string(),
            close_date: date,
            plot_date: align.then(|| align_to_reference(date)),
            daily_sales,
            cumulative_sales: running,
        });
    }

    rows
}

/// Build the weekly series over fixed week-ending buckets
///
/// **Public** - cohort-agnostic; apply any cohort filter upstream
///
/// # Returns
/// One row per ISO week present, labelled by the week's final day (Sunday),
/// ordered by bucket ascending
pub fn weekly_volume(records: &[SaleRecord]) -> Vec<WeeklyVolumeRow> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for rec in records {
        if let Some(date) = rec.close_date() {
            *counts.entry(week_ending(date)).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(week_ending, sales)| WeeklyVolumeRow { week_ending, sales })
        .collect()
}

/// Reproject a date onto the fixed reference year, preserving month/day
///
/// **Public** - the calendar-alignment overlay for cross-year seasonality
/// comparison. The reference year is a leap year, so every month/day of a
/// valid source date (including Feb 29) has a target.
pub fn align_to_reference(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(ALIGNMENT_YEAR, date.month(), date.day())
        .expect("leap reference year covers every month/day")
}

/// Final day (Sunday) of the ISO week containing `date`
fn week_ending(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).last_day()
}
