//! Loosely typed tables as they arrive from a sheet.

use polars::prelude::{AnyValue, DataFrame};

use crate::polars_utils::any_to_string;

/// Rows of string cells under a header row. Rows are padded to the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Build a table from a frame loaded elsewhere (for example a spreadsheet reader).
    ///
    /// Every cell is stringified so the same coercion rules apply regardless of
    /// the dtype the loader inferred.
    pub fn from_dataframe(df: &DataFrame) -> Self {
        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(ToString::to_string)
            .collect();
        let columns = df.get_columns();
        let mut rows = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let row = columns
                .iter()
                .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect();
            rows.push(row);
        }
        Self { headers, rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }
}
