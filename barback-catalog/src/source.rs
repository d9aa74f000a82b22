//! CSV row reading.
//!
//! Rows are read without a fixed header: spreadsheet exports often carry a
//! title or blank lines above the real column labels, so header detection
//! happens later in [`crate::convert`].

use std::io::Read;
use std::path::Path;

use crate::error::CatalogError;

/// One CSV record with its trimmed cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-based line in the input where the record starts.
    pub line: u64,
    pub cells: Vec<String>,
}

impl SourceRow {
    pub fn new(line: u64, cells: Vec<String>) -> Self {
        Self { line, cells }
    }
}

/// Read every record from a CSV stream.
///
/// Records that fail to decode are skipped with a warning rather than
/// aborting the whole file.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<SourceRow>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping malformed CSV row: {e}");
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let mut cells: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();

        if rows.is_empty()
            && let Some(first) = cells.first_mut()
            && let Some(stripped) = first.strip_prefix('\u{feff}')
        {
            *first = stripped.trim().to_string();
        }

        rows.push(SourceRow::new(line, cells));
    }

    log::debug!("Read {} CSV rows", rows.len());
    Ok(rows)
}

/// Read every record from a CSV file.
pub fn read_rows_from_path(path: &Path) -> Result<Vec<SourceRow>, CatalogError> {
    let file = std::fs::File::open(path)?;
    read_rows(file)
}

/// Read every record from CSV text.
pub fn read_rows_from_str(content: &str) -> Result<Vec<SourceRow>, CatalogError> {
    read_rows(content.as_bytes())
}
