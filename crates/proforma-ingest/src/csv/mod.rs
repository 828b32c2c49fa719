//! CSV reading utilities.

mod header;
mod reader;

pub use header::{normalize_cell, normalize_header};
pub use reader::{read_csv_from_reader, read_csv_table};
