//! Library side of the `proforma` command: logging setup, configuration
//! loading and the staged analysis pipeline.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
