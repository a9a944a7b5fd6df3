//! Output writers for report data.
//!
//! The report JSON is the boundary with the presentation layer: plain
//! structured row sets, no binary format. Rendering is owned elsewhere.

pub mod json;

// Re-export main functions
pub use json::{read_report, write_report};
