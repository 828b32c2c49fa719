//! Analysis pipeline with explicit stages.
//!
//! 1. **Ingest**: read the sheet, resolve columns, coerce cells
//! 2. **Metrics**: derive per-record dispense value, costs and shares
//! 3. **Aggregate**: totals and the profit ranking
//! 4. **Output**: extended CSV and summary JSON
//!
//! Every stage runs inside its own span and logs its duration.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, trace};

use proforma_ingest::{NormalizedTable, RawTable, normalize_table, read_csv_table};
use proforma_model::{ColumnSchema, ExtendedTable, ScenarioConfig, Summary};
use proforma_report::{summarize, write_extended_csv, write_summary_json};
use proforma_transform::compute_metrics;

use crate::logging::redact_value;
use crate::types::{AnalysisResult, OutputPaths};

/// Inputs for one `analyze` run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub source: PathBuf,
    pub schema: ColumnSchema,
    pub config: ScenarioConfig,
    /// `None` skips the output stage.
    pub output_dir: Option<PathBuf>,
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Read and normalize a CSV sheet.
pub fn ingest(
    path: &Path,
    schema: &ColumnSchema,
    config: &ScenarioConfig,
) -> Result<NormalizedTable> {
    let span = info_span!("ingest", source = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let table = read_csv_table(path).with_context(|| format!("read {}", path.display()))?;
    let normalized = normalize_raw(&table, schema, config)?;

    info!(
        rows = normalized.records.len(),
        coerced = normalized.coercions.total(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(normalized)
}

/// Normalize a frame handed over by another loader (for example a spreadsheet reader).
pub fn ingest_frame(
    df: &DataFrame,
    schema: &ColumnSchema,
    config: &ScenarioConfig,
) -> Result<NormalizedTable> {
    let table = RawTable::from_dataframe(df);
    normalize_raw(&table, schema, config)
}

fn normalize_raw(
    table: &RawTable,
    schema: &ColumnSchema,
    config: &ScenarioConfig,
) -> Result<NormalizedTable> {
    let normalized = normalize_table(table, schema, config).context("validate sheet columns")?;
    for (field, index, header) in normalized.columns.iter() {
        debug!(field = %field, column = index, header, "column resolved");
    }
    Ok(normalized)
}

// ============================================================================
// Stage 2: Metrics
// ============================================================================

pub fn metrics(normalized: &NormalizedTable, config: &ScenarioConfig) -> Result<ExtendedTable> {
    let span = info_span!("metrics");
    let _guard = span.enter();
    let start = Instant::now();

    let table = compute_metrics(&normalized.records, config).context("compute metrics")?;
    info!(
        records = table.len(),
        filtered_out = table.filtered_out,
        missing_dose_excluded = table.missing_dose_excluded,
        duration_ms = start.elapsed().as_millis(),
        "metrics complete"
    );
    Ok(table)
}

// ============================================================================
// Stage 3: Aggregate
// ============================================================================

pub fn aggregate(table: &ExtendedTable, config: &ScenarioConfig) -> Summary {
    let span = info_span!("aggregate");
    let _guard = span.enter();
    let start = Instant::now();

    let summary = summarize(table, config);
    for drug in &summary.top_drugs {
        trace!(rank = drug.rank, drug = redact_value(&drug.name), "ranked drug");
    }
    info!(
        asp_net_profit = summary.asp.net_profit,
        awp_net_profit = summary.awp.net_profit,
        duration_ms = start.elapsed().as_millis(),
        "summary complete"
    );
    summary
}

// ============================================================================
// Stage 4: Output
// ============================================================================

pub fn output(dir: &Path, table: &ExtendedTable, summary: &Summary) -> Result<OutputPaths> {
    let span = info_span!("output", dir = %dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let extended_csv = write_extended_csv(dir, table).context("write extended table")?;
    let summary_json = write_summary_json(dir, summary).context("write summary")?;
    info!(duration_ms = start.elapsed().as_millis(), "output complete");
    Ok(OutputPaths {
        extended_csv: Some(extended_csv),
        summary_json: Some(summary_json),
    })
}

/// Run every stage for one sheet.
pub fn run_analysis(request: &AnalysisRequest) -> Result<AnalysisResult> {
    let span = info_span!("analyze", scenario = ?request.config.scenario);
    let _guard = span.enter();

    let normalized = ingest(&request.source, &request.schema, &request.config)?;
    let table = metrics(&normalized, &request.config)?;
    let summary = aggregate(&table, &request.config);
    let outputs = match &request.output_dir {
        Some(dir) => output(dir, &table, &summary)?,
        None => {
            debug!("dry run, outputs skipped");
            OutputPaths::default()
        }
    };

    Ok(AnalysisResult {
        source: request.source.clone(),
        table,
        summary,
        coercions: normalized.coercions,
        outputs,
    })
}
