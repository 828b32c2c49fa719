//! Pro forma reporting.
//!
//! - **summary**: [`summarize`] totals and the [`top_n_by_profit`] ranking
//! - **hypothetical**: the standalone revenue / profit / margin calculator
//! - **output**: CSV and JSON writers for one analysis run

pub mod error;
pub mod hypothetical;
pub mod output;
pub mod summary;

pub use error::{ReportError, Result};
pub use hypothetical::{HypotheticalInput, HypotheticalResult, hypothetical};
pub use output::{EXTENDED_CSV, SUMMARY_JSON, write_extended_csv, write_summary_json};
pub use summary::{margin_pct, summarize, top_n_by_profit};
