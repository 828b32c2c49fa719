//! CSV loading into a [`RawTable`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};
use crate::table::RawTable;

use super::header::{normalize_cell, normalize_header};

/// Reads a CSV file whose first non-blank row holds the column headers.
///
/// Blank rows are skipped, cells are trimmed and a UTF-8 BOM is dropped.
/// Ragged rows are padded or truncated to the header width.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    read_csv_from_reader(file, path)
}

/// Same as [`read_csv_table`] for an in-memory or already-open source.
/// `origin` is only used in error messages.
pub fn read_csv_from_reader<R: Read>(source: R, origin: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        match headers {
            None => headers = Some(row.iter().map(|value| normalize_header(value)).collect()),
            Some(_) => rows.push(row),
        }
    }

    let Some(headers) = headers else {
        return Err(IngestError::EmptyCsv {
            path: origin.to_path_buf(),
        });
    };
    tracing::debug!(
        source = %origin.display(),
        columns = headers.len(),
        rows = rows.len(),
        "csv table loaded"
    );
    Ok(RawTable::new(headers, rows))
}
