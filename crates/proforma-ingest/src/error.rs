//! Error types for sheet ingestion.

use std::path::PathBuf;

use proforma_model::{Field, ModelError};
use thiserror::Error;

/// Errors that stop a table from entering the pipeline.
///
/// Unparseable cells are not errors; they are coerced and counted in
/// [`crate::CoercionReport`].
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected the input.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty or has only blank rows.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Schema Errors ===
    /// A column required by the active configuration is absent.
    #[error("missing required column '{expected}' ({field}); accepted headers: {accepted}")]
    MissingColumn {
        field: Field,
        expected: String,
        accepted: String,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    // === Configuration Errors ===
    #[error(transparent)]
    Config(#[from] ModelError),
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
