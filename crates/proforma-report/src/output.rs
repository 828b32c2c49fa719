//! Output files for one analysis run.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, SerWriter};
use proforma_model::{ExtendedTable, Summary};
use proforma_transform::extended_frame;

use crate::error::{ReportError, Result};

pub const EXTENDED_CSV: &str = "extended.csv";
pub const SUMMARY_JSON: &str = "summary.json";

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write sheet and derived columns to `<dir>/extended.csv`.
pub fn write_extended_csv(dir: &Path, table: &ExtendedTable) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(EXTENDED_CSV);
    let write_error = |message: String| ReportError::Write {
        path: path.clone(),
        message,
    };

    let mut df = extended_frame(table).map_err(|e| write_error(e.to_string()))?;
    let mut file = create(&path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| write_error(e.to_string()))?;

    tracing::info!(path = %path.display(), rows = df.height(), "extended table written");
    Ok(path)
}

/// Write the summary as pretty JSON to `<dir>/summary.json`.
pub fn write_summary_json(dir: &Path, summary: &Summary) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(SUMMARY_JSON);
    let file = create(&path)?;
    serde_json::to_writer_pretty(file, summary)?;
    tracing::info!(path = %path.display(), "summary written");
    Ok(path)
}
