//! Scenario configuration from files and flag strings.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use proforma_model::{ColumnSchema, Field, ScenarioConfig};

/// Read a JSON scenario file. Missing keys take their defaults.
pub fn load_config_file(path: &Path) -> Result<ScenarioConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config: ScenarioConfig = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "scenario config loaded");
    Ok(config)
}

/// Parse a `FIELD=HEADER` column override, e.g. `rx_count=Fills`.
pub fn parse_column_override(value: &str) -> Result<(Field, String)> {
    let (field, header) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("column override must look like FIELD=HEADER, got '{value}'"))?;
    let field: Field = field.parse()?;
    let header = header.trim();
    if header.is_empty() {
        return Err(anyhow!("column override for {field} has an empty header"));
    }
    Ok((field, header.to_string()))
}

/// Build a schema from repeated `--column` values.
pub fn column_schema(overrides: &[String]) -> Result<ColumnSchema> {
    overrides.iter().try_fold(ColumnSchema::new(), |schema, value| {
        let (field, header) = parse_column_override(value)?;
        Ok(schema.with_override(field, header))
    })
}
