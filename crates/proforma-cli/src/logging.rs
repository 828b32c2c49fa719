//! Logging setup for the `proforma` binary.
//!
//! - `warn`: coerced cells, excluded rows
//! - `info`: stage progress and timings
//! - `debug`: resolved columns, counts
//! - `trace`: per-row values, drug names redacted unless `--log-data` is given

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Crates whose events follow the configured level; everything else stays at warn.
const WORKSPACE_CRATES: [&str; 5] = [
    "proforma_cli",
    "proforma_ingest",
    "proforma_model",
    "proforma_report",
    "proforma_transform",
];

pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Returns the input when `--log-data` was given, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if LOG_DATA_ENABLED.load(Ordering::Relaxed) {
        value
    } else {
        REDACTED_VALUE
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace the configured level when it is set.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
    pub log_data: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// One JSON object per event, with span close events carrying timings.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            install(config, Mutex::new(file));
        }
        None => install(config, io::stderr),
    }
    Ok(())
}

fn install<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    let filter = build_env_filter(config.level_filter, config.use_env_filter);
    let layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .without_time()
            .with_target(false)
            .with_ansi(config.with_ansi)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .without_time()
            .with_target(false)
            .with_ansi(config.with_ansi)
            .with_writer(writer)
            .boxed(),
    };
    tracing_subscriber::registry().with(filter).with(layer).init();
}

/// Directive string for `level_filter`: workspace crates at that level, others at warn.
pub fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    let base = if level_filter == LevelFilter::OFF { "off" } else { "warn" };
    std::iter::once(base.to_string())
        .chain(WORKSPACE_CRATES.iter().map(|name| format!("{name}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

fn build_env_filter(level_filter: LevelFilter, use_env: bool) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(level_filter));
    if use_env {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_workspace_crates() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("proforma_transform=debug"));
        assert!(directives.contains("proforma_cli=debug"));
    }

    #[test]
    fn off_silences_everything() {
        assert!(default_directives(LevelFilter::OFF).starts_with("off,"));
    }

    #[test]
    fn values_are_redacted_by_default() {
        assert_eq!(redact_value("ALPHA 50 MG"), REDACTED_VALUE);
    }
}
