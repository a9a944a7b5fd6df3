//! Raw tabular input, before any typing or validation.
//!
//! Both supported encodings (plain CSV and zip-packaged CSV exports)
//! decode into this one shape, so every downstream step is shared.

/// A decoded input table: one header row plus string data rows
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names, from the header row
    pub headers: Vec<String>,

    /// Each data row, as a Vec of Strings (one per field)
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Find the index of a column by exact (case-sensitive) name
    ///
    /// **Public** - used by the normalizer to resolve required columns
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Field at `idx` in `row`, trimmed; `None` if the row is short or the
    /// cell is empty
    pub fn field<'a>(row: &'a [String], idx: usize) -> Option<&'a str> {
        row.get(idx).map(|v| v.trim()).filter(|v| !v.is_empty())
    }
}
