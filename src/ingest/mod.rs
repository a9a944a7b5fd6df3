//! Input file ingestion.
//!
//! This module handles:
//! - Decoding plain CSV exports
//! - Decoding zip-packaged CSV archives
//! - Converging both encodings on one `RawTable` shape

pub mod reader;
pub mod table;

// Re-export main types and functions
pub use reader::{load_table, table_from_bytes};
pub use table::RawTable;
