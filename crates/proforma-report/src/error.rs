//! Error types for summaries and output files.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Profit and margin were given but a 0% margin cannot imply a revenue.
    #[error("cannot derive revenue from a 0% margin")]
    DegenerateMargin,

    #[error("invalid hypothetical input: {0}")]
    InvalidInput(String),

    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
