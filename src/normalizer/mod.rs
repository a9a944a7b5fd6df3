//! Record normalization and schema definitions.
//!
//! This module handles:
//! - Validating required columns in the raw table
//! - Coercing close/order dates (failures become the unknown marker)
//! - Deriving the ordinal contact count from the lifecycle-stage table
//! - Memoizing normalized batches by content fingerprint
//! - Defining the report schema the aggregates fill in

pub mod cache;
pub mod records;
pub mod schema;

// Re-export main types
pub use records::{normalize_records, NormalizeStats, NormalizedBatch};
pub use schema::{
    CohortKpiRow, ContactMixRow, DailyVolumeRow, Report, SaleRecord, SeriesYearRow,
    WeeklyVolumeRow,
};
