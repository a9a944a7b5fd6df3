//! Per-cohort KPI summaries and the contact-count mix.
//!
//! A cohort is the set of sale records sharing a `campaign_year` value.
//! Every function here is a pure transform of its input slice; rows come
//! back ordered by cohort label ascending.

use crate::normalizer::schema::{CohortKpiRow, ContactMixRow, SaleRecord};
use log::debug;
use std::collections::BTreeMap;

/// Compute the KPI summary for every cohort present
///
/// **Public** - main entry point for cohort aggregation
///
/// # Arguments
/// * `records` - Normalized (and already filtered) record slice
///
/// # Returns
/// One row per distinct `campaign_year`, ordered by label ascending
pub fn cohort_kpis(records: &[SaleRecord]) -> Vec<CohortKpiRow> {
    let by_year = group_by_year(records);
    debug!("Computing KPIs for {} cohorts", by_year.len());

    by_year
        .into_iter()
        .map(|(year, cohort)| {
            let total_sales = cohort.len() as u64;
            let zero_touch_count = cohort.iter().filter(|r| r.contact_count == 0).count() as u64;

            // Records with an unparseable days value are skipped, not zeroed
            let days: Vec<f64> = cohort.iter().filter_map(|r| r.days_to_plan_close).collect();

            CohortKpiRow {
                campaign_year: year.to_string(),
                total_sales,
                avg_contacts: mean(cohort.iter().map(|r| f64::from(r.contact_count))),
                avg_days_to_close: mean(days.iter().copied()),
                median_days_to_close: median(days),
                zero_touch_count,
                pct_zero_touch: percentage(zero_touch_count, total_sales),
            }
        })
        .collect()
}

/// Compute the contact-count distribution within each cohort
///
/// **Public** - one row per (cohort, contact_count) bucket present, with
/// the bucket's share of the cohort's sales. Shares within one cohort sum
/// to 100 (up to rounding).
pub fn contact_mix(records: &[SaleRecord]) -> Vec<ContactMixRow> {
    let mut buckets: BTreeMap<(&str, u8), u64> = BTreeMap::new();
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();

    for rec in records {
        *buckets
            .entry((rec.campaign_year.as_str(), rec.contact_count))
            .or_default() += 1;
        *totals.entry(rec.campaign_year.as_str()).or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|((year, contact_count), sales)| ContactMixRow {
            campaign_year: year.to_string(),
            contact_count,
            sales,
            pct_of_cohort: percentage(sales, totals.get(year).copied().unwrap_or(0)),
        })
        .collect()
}

/// Group records by cohort label, sorted ascending
fn group_by_year(records: &[SaleRecord]) -> BTreeMap<&str, Vec<&SaleRecord>> {
    let mut by_year: BTreeMap<&str, Vec<&SaleRecord>> = BTreeMap::new();
    for rec in records {
        by_year.entry(rec.campaign_year.as_str()).or_default().push(rec);
    }
    by_year
}

/// Share of `part` in `total`, as a percentage; 0 when the total is 0
fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Arithmetic mean; 0 for an empty sample
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u64), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Median; an even-sized sample averages the two middle values, an empty
/// sample yields 0
fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}
