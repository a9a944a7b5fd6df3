//! Input readers for the supported file encodings.
//!
//! Dispatches on file extension:
//! - `.csv` - plain CSV export
//! - `.zip` - archive of CSV entries (the form spreadsheet tools emit)
//!
//! Every encoding converges on the same `RawTable`, so the normalizer
//! is invoked identically regardless of input format.

use super::table::RawTable;
use crate::utils::error::IngestError;
use csv::ReaderBuilder;
use log::{debug, warn};
use std::io::{Cursor, Read};
use std::path::Path;

/// UTF-8 byte-order mark some exporters prepend
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Load a raw table from an input file
///
/// **Public** - main entry point for ingestion
///
/// # Arguments
/// * `path` - Path to a `.csv` or `.zip` input file
///
/// # Returns
/// Decoded table with headers and string rows
///
/// # Errors
/// * `IngestError::Io` - file cannot be read
/// * `IngestError::UnsupportedExtension` - not `.csv` or `.zip`
/// * `IngestError::Csv` / `IngestError::Zip` - decode failures
pub fn load_table(path: &Path) -> Result<RawTable, IngestError> {
    let bytes = std::fs::read(path)?;
    table_from_bytes(&bytes, path)
}

/// Decode a raw table from in-memory bytes
///
/// **Public** - split out from `load_table` so callers that already hold
/// the bytes (e.g. for cache fingerprinting) can reuse them
pub fn table_from_bytes(bytes: &[u8], source: &Path) -> Result<RawTable, IngestError> {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => read_csv_table(strip_bom(bytes)),
        "zip" => read_zip_table(bytes, source),
        other => Err(IngestError::UnsupportedExtension(other.to_string())),
    }
}

/// Strip a UTF-8 BOM if present
fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Decode one CSV stream into a table
///
/// Malformed rows are skipped with a warning rather than aborting the
/// batch; the header row is required.
fn read_csv_table(input: impl Read) -> Result<RawTable, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.records() {
        match record {
            Ok(r) => rows.push(r.iter().map(str::to_string).collect()),
            Err(e) => {
                warn!("Skipping malformed CSV record: {}", e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        debug!("Skipped {} malformed rows during CSV decode", skipped);
    }

    Ok(RawTable { headers, rows })
}

/// Decode every CSV entry of a zip archive into one table
///
/// The first entry's header row is canonical; later entries with a
/// different header row are skipped with a warning.
fn read_zip_table(bytes: &[u8], source: &Path) -> Result<RawTable, IngestError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut merged: Option<RawTable> = None;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if !entry.is_file() || !entry.name().ends_with(".csv") {
            continue;
        }

        let name = entry.name().to_string();
        let mut entry_bytes = Vec::new();
        entry.read_to_end(&mut entry_bytes)?;
        let table = read_csv_table(strip_bom(&entry_bytes))?;

        if let Some(m) = merged.as_mut() {
            if m.headers == table.headers {
                debug!("Archive entry {}: appending {} rows", name, table.rows.len());
                m.rows.extend(table.rows);
            } else {
                warn!("Archive entry {} has a mismatched header row, skipping", name);
            }
        } else {
            debug!("Archive entry {}: {} rows", name, table.rows.len());
            merged = Some(table);
        }
    }

    merged.ok_or_else(|| IngestError::NoCsvEntries(source.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use zip::write::FileOptions;
    use zip::CompressionMethod;

    const SAMPLE: &str = "customer_no,campaign_year\nC-1,2025\nC-2,2026\n";

    fn zip_of(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options: FileOptions<'_, ()> =
                FileOptions::default().compression_method(CompressionMethod::Stored);
            for (name, content) in entries {
                zip.start_file(*name, options.clone()).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buf
    }

    #[test]
    fn test_csv_decode() {
        let table = table_from_bytes(SAMPLE.as_bytes(), &PathBuf::from("sales.csv")).unwrap();
        assert_eq!(table.headers, vec!["customer_no", "campaign_year"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["C-2", "2026"]);
    }

    #[test]
    fn test_csv_strips_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(SAMPLE.as_bytes());
        let table = table_from_bytes(&bytes, &PathBuf::from("sales.csv")).unwrap();
        assert_eq!(table.headers[0], "customer_no");
    }

    #[test]
    fn test_zip_matches_plain_csv() {
        let csv_table = table_from_bytes(SAMPLE.as_bytes(), &PathBuf::from("sales.csv")).unwrap();

        let archive = zip_of(&[("export/sales.csv", SAMPLE)]);
        let zip_table = table_from_bytes(&archive, &PathBuf::from("sales.zip")).unwrap();

        assert_eq!(zip_table.headers, csv_table.headers);
        assert_eq!(zip_table.rows, csv_table.rows);
    }

    #[test]
    fn test_zip_merges_matching_entries() {
        let archive = zip_of(&[
            ("a.csv", "customer_no,campaign_year\nC-1,2025\n"),
            ("b.csv", "customer_no,campaign_year\nC-2,2026\n"),
            ("other.csv", "totally,different,headers\nx,y,z\n"),
        ]);
        let table = table_from_bytes(&archive, &PathBuf::from("sales.zip")).unwrap();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_zip_without_csv_entries() {
        let archive = zip_of(&[("readme.txt", "not a table")]);
        let err = table_from_bytes(&archive, &PathBuf::from("sales.zip")).unwrap_err();
        assert!(matches!(err, IngestError::NoCsvEntries(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = table_from_bytes(b"x", &PathBuf::from("sales.parquet")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedExtension(_)));
    }

    #[test]
    fn test_load_table_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.rows.len(), 2);

        let err = load_table(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }
}
