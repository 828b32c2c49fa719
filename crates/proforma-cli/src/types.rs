use std::path::PathBuf;

use proforma_ingest::CoercionReport;
use proforma_model::{ExtendedTable, Summary};

/// Everything one `analyze` run produced.
#[derive(Debug)]
pub struct AnalysisResult {
    pub source: PathBuf,
    pub table: ExtendedTable,
    pub summary: Summary,
    pub coercions: CoercionReport,
    pub outputs: OutputPaths,
}

/// Files written by the output stage; empty on a dry run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub extended_csv: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

impl OutputPaths {
    pub fn is_empty(&self) -> bool {
        self.extended_csv.is_none() && self.summary_json.is_none()
    }
}
