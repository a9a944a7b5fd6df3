//! Main record normalizer for raw sale tables.
//!
//! Turns a `RawTable` into typed `SaleRecord`s: validates the required
//! columns, coerces dates, and derives the ordinal contact count from the
//! lifecycle-stage table. There is exactly one normalizer; every input
//! encoding flows through it with identical mapping and date handling.

use super::schema::SaleRecord;
use crate::ingest::RawTable;
use crate::utils::config::{CONTACT_STAGES, DATETIME_FORMATS, DATE_FORMATS, REQUIRED_COLUMNS};
use crate::utils::error::SchemaError;
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, warn};

/// Per-field degradations observed while normalizing one batch
///
/// None of these abort the run; each failure is local to its field and the
/// record is retained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Data rows consumed from the raw table
    pub rows_in: usize,

    /// Non-empty `plan_close_dt` cells that would not parse
    pub close_date_failures: usize,

    /// Non-empty `order_dt` cells that would not parse
    pub order_date_failures: usize,

    /// Non-empty lifecycle labels absent from the stage table
    pub unmapped_stages: usize,
}

/// A normalized record batch plus its data-quality counters
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    pub records: Vec<SaleRecord>,
    pub stats: NormalizeStats,
}

/// Resolved indices of the required columns
struct Columns {
    customer_no: usize,
    campaign_year: usize,
    campaign_series: usize,
    plan_close_dt: usize,
    order_dt: usize,
    previous_step: usize,
    days_to_close: usize,
}

/// Normalize a raw table into typed sale records
///
/// **Public** - main entry point for normalization
///
/// # Arguments
/// * `table` - Decoded input table (any supported encoding)
///
/// # Returns
/// Records in input order, plus per-field degradation counters
///
/// # Errors
/// * `SchemaError::MissingColumn` - a required column is absent (fatal;
///   per-field problems never are)
pub fn normalize_records(table: &RawTable) -> Result<NormalizedBatch, SchemaError> {
    let cols = resolve_columns(table)?;

    let mut stats = NormalizeStats {
        rows_in: table.rows.len(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        let plan_close_dt = coerce_datetime(
            RawTable::field(row, cols.plan_close_dt),
            &mut stats.close_date_failures,
        );
        let order_dt = coerce_datetime(
            RawTable::field(row, cols.order_dt),
            &mut stats.order_date_failures,
        );

        let stage = RawTable::field(row, cols.previous_step).unwrap_or_default();
        let contact_count = match contact_count_for(stage) {
            Some(count) => count,
            None => {
                // Unknown label: treated as no prior contact, not as an error
                debug!("Lifecycle label not in stage table: {:?}", stage);
                stats.unmapped_stages += 1;
                0
            }
        };

        records.push(SaleRecord {
            customer_no: RawTable::field(row, cols.customer_no)
                .unwrap_or_default()
                .to_string(),
            campaign_year: normalize_year(RawTable::field(row, cols.campaign_year)),
            campaign_series: RawTable::field(row, cols.campaign_series)
                .unwrap_or_default()
                .to_string(),
            plan_close_dt,
            order_dt,
            previous_step_at_closure: stage.to_string(),
            contact_count,
            days_to_plan_close: RawTable::field(row, cols.days_to_close)
                .and_then(|v| v.parse::<f64>().ok()),
        });
    }

    if stats.close_date_failures > 0 || stats.unmapped_stages > 0 {
        warn!(
            "Normalized {} rows with {} unparseable close dates and {} unmapped lifecycle labels",
            stats.rows_in, stats.close_date_failures, stats.unmapped_stages
        );
    } else {
        debug!("Normalized {} rows cleanly", stats.rows_in);
    }

    Ok(NormalizedBatch { records, stats })
}

/// Resolve every required column, failing on the first missing one
fn resolve_columns(table: &RawTable) -> Result<Columns, SchemaError> {
    for required in REQUIRED_COLUMNS {
        if table.column_index(required).is_none() {
            return Err(SchemaError::MissingColumn(required.to_string()));
        }
    }

    // Indices are now known to exist
    let idx = |name: &str| table.column_index(name).unwrap_or_default();
    Ok(Columns {
        customer_no: idx("customer_no"),
        campaign_year: idx("campaign_year"),
        campaign_series: idx("campaign_series"),
        plan_close_dt: idx("plan_close_dt"),
        order_dt: idx("order_dt"),
        previous_step: idx("previous_step_at_closure"),
        days_to_close: idx("days_to_plan_close"),
    })
}

/// Map a lifecycle-stage label to its contact count
///
/// Exact-match lookup. An empty label is "no prior contact" (Some(0));
/// a non-empty label missing from the table is `None` so the caller can
/// count it before defaulting to 0.
fn contact_count_for(stage: &str) -> Option<u8> {
    if stage.is_empty() {
        return Some(0);
    }
    CONTACT_STAGES
        .iter()
        .find(|(label, _)| *label == stage)
        .map(|(_, count)| *count)
}

/// Coerce a raw date cell, counting non-empty values that fail to parse
fn coerce_datetime(raw: Option<&str>, failures: &mut usize) -> Option<NaiveDateTime> {
    let raw = raw?;
    match parse_datetime(raw) {
        Some(dt) => Some(dt),
        None => {
            debug!("Unparseable date value: {:?}", raw);
            *failures += 1;
            None
        }
    }
}

/// Strict parse against the accepted layouts, timestamps first
fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Normalize the cohort label to a stable, non-empty string
///
/// Numeric exports sometimes deliver years as floats ("2025.0"); those
/// normalize to the integer form. An empty cell becomes "unknown" so the
/// cohort key is never empty.
fn normalize_year(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(v) => v,
        None => return "unknown".to_string(),
    };

    if let Some(integral) = raw.strip_suffix(".0") {
        if !integral.is_empty() && integral.chars().all(|c| c.is_ascii_digit()) {
            return integral.to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        }
    }

    fn full_table(rows: &[&[&str]]) -> RawTable {
        table(
            &[
                "customer_no",
                "campaign_year",
                "campaign_series",
                "plan_close_dt",
                "order_dt",
                "previous_step_at_closure",
                "days_to_plan_close",
            ],
            rows,
        )
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let t = table(&["customer_no", "campaign_year"], &[]);
        let err = normalize_records(&t).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn(_)));
        assert!(err.to_string().contains("campaign_series"));
    }

    #[test]
    fn test_stage_table_mapping() {
        assert_eq!(contact_count_for("TKT - To start"), Some(0));
        assert_eq!(contact_count_for("TKT - 3rd contact complete"), Some(3));
        assert_eq!(contact_count_for("TKT - 5th contact complete"), Some(5));
        assert_eq!(contact_count_for("TKT - 6th contact complete"), None);
        assert_eq!(contact_count_for(""), Some(0));
    }

    #[test]
    fn test_unmapped_stage_defaults_to_zero() {
        let t = full_table(&[&[
            "C-1",
            "2025",
            "A",
            "2025-03-01",
            "2025-02-20",
            "TKT - 6th contact complete",
            "9",
        ]]);
        let batch = normalize_records(&t).unwrap();
        assert_eq!(batch.records[0].contact_count, 0);
        assert_eq!(batch.stats.unmapped_stages, 1);
    }

    #[test]
    fn test_unparseable_close_date_is_retained() {
        let t = full_table(&[&[
            "C-1",
            "2025",
            "A",
            "not-a-date",
            "",
            "TKT - 1st contact complete",
            "4.5",
        ]]);
        let batch = normalize_records(&t).unwrap();
        let rec = &batch.records[0];
        assert!(rec.plan_close_dt.is_none());
        assert!(rec.close_date().is_none());
        assert_eq!(rec.contact_count, 1);
        assert_eq!(rec.days_to_plan_close, Some(4.5));
        assert_eq!(batch.stats.close_date_failures, 1);
        assert_eq!(batch.stats.order_date_failures, 0);
    }

    #[test]
    fn test_datetime_layouts() {
        assert!(parse_datetime("2025-03-01 14:30:00").is_some());
        assert!(parse_datetime("2025-03-01T14:30:00").is_some());
        assert!(parse_datetime("2025/03/01").is_some());
        assert!(parse_datetime("03/01/2025").is_some());
        assert!(parse_datetime("yesterday").is_none());
    }

    #[test]
    fn test_year_normalization() {
        assert_eq!(normalize_year(Some("2025")), "2025");
        assert_eq!(normalize_year(Some("2025.0")), "2025");
        assert_eq!(normalize_year(Some("wave-2")), "wave-2");
        assert_eq!(normalize_year(None), "unknown");
    }

    #[test]
    fn test_contact_count_stays_in_range() {
        let t = full_table(&[
            &["C-1", "2025", "A", "2025-03-01", "", "TKT - To start", "1"],
            &["C-2", "2025", "A", "2025-03-02", "", "garbage", "2"],
            &["C-3", "2025", "A", "2025-03-03", "", "TKT - 5th contact complete", "3"],
        ]);
        let batch = normalize_records(&t).unwrap();
        for rec in &batch.records {
            assert!(rec.contact_count <= crate::utils::config::MAX_CONTACT_COUNT);
        }
    }
}
