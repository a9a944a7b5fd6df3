//! Series-by-year pivot.
//!
//! Compares how many touches a campaign series required in one cohort
//! versus another. Sparse: absent (series, year) combinations get no row.

use crate::normalizer::schema::{SaleRecord, SeriesYearRow};
use std::collections::BTreeMap;

#[derive(Default)]
struct PairAcc {
    sales: u64,
    contact_sum: u64,
}

/// Compute grouped statistics per (campaign_series, campaign_year) pair
///
/// **Public** - main entry point for the cross-dimensional pivot
///
/// # Returns
/// One row per pair present, ordered by series then year ascending
pub fn series_year_breakdown(records: &[SaleRecord]) -> Vec<SeriesYearRow> {
    let mut pairs: BTreeMap<(&str, &str), PairAcc> = BTreeMap::new();

    for rec in records {
        let acc = pairs
            .entry((rec.campaign_series.as_str(), rec.campaign_year.as_str()))
            .or_default();
        acc.sales += 1;
        acc.contact_sum += u64::from(rec.contact_count);
    }

    pairs
        .into_iter()
        .map(|((series, year), acc)| SeriesYearRow {
            campaign_series: series.to_string(),
            campaign_year: year.to_string(),
            sales_count: acc.sales,
            avg_contacts: acc.contact_sum as f64 / acc.sales as f64,
        })
        .collect()
}
