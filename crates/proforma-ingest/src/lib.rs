//! Profitability sheet ingestion.
//!
//! Loads a sheet into a [`RawTable`], validates its columns against the
//! active [`proforma_model::ScenarioConfig`], and coerces every row into a
//! [`proforma_model::DrugRecord`].

pub mod csv;
pub mod error;
pub mod normalization;
pub mod normalize;
pub mod polars_utils;
pub mod schema;
pub mod table;

pub use csv::{read_csv_from_reader, read_csv_table};
pub use error::{IngestError, Result};
pub use normalize::{CoercionReport, NormalizedTable, normalize_table};
pub use schema::{ResolvedColumns, required_fields, resolve_columns};
pub use table::RawTable;
