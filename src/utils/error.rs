//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading an input file into a raw table
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV decode failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("zip archive decode failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive contains no CSV entries: {0}")]
    NoCsvEntries(String),

    #[error("unsupported input extension: {0} (expected .csv or .zip)")]
    UnsupportedExtension(String),
}

/// Fatal schema problems in the input table.
///
/// Per-field problems (a date that will not parse, a lifecycle label the
/// stage table does not know) are NOT errors; they degrade to the unknown
/// marker or a zero contact count and are tallied in `NormalizeStats`.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("required column missing: {0}")]
    MissingColumn(String),
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
