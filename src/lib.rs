//! Campaign Compare
//!
//! Cohort KPI derivation and time-aligned series comparison for
//! outbound campaign sale records.
//!
//! This crate provides the core implementation for the
//! `campaign-compare` CLI tool: it normalizes raw sale exports into
//! typed records, derives per-cohort KPIs, daily/weekly/cumulative
//! series, and series-by-year pivots, and writes the result tables
//! as a versioned JSON report.
//!
//! ## Getting Started
//!
//! Most users should use the CLI:
//!
//! ```bash
//! campaign-compare analyze --input sales.csv --output report.json
//! ```

pub mod aggregator;
pub mod commands;
pub mod ingest;
pub mod normalizer;
pub mod output;
pub mod utils;
