//! Derived-metrics pipeline for the dispensing pro forma.
//!
//! - **metrics**: [`compute_metrics`], the pure per-record pipeline
//! - **filter**: `profitable_only` predicates for both filter stages
//! - **frame**: extended table as a Polars DataFrame for export

pub mod filter;
pub mod frame;
pub mod metrics;

pub use frame::extended_frame;
pub use metrics::compute_metrics;
