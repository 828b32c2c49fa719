//! Derived per-record metrics produced by the pipeline.

use serde::{Deserialize, Serialize};

use crate::basis::ProfitBasis;
use crate::record::DrugRecord;

/// Profit and revenue figures for one record under one basis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BasisMetrics {
    pub profit_per_unit: f64,
    pub profit_per_rx: f64,
    pub total_dispense_value: f64,
    /// COGS plus dispense value; `None` when the sheet has no purchase price.
    pub revenue: Option<f64>,
    pub scenario_profit: f64,
    pub revenue_share_amount: f64,
    pub net_profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedRecord {
    pub record: DrugRecord,
    pub total_cogs: Option<f64>,
    pub courier_cost: f64,
    pub misc_cost: f64,
    pub variable_cost: f64,
    pub staffing_share: f64,
    pub asp: BasisMetrics,
    pub awp: BasisMetrics,
}

impl ExtendedRecord {
    pub fn basis(&self, basis: ProfitBasis) -> &BasisMetrics {
        match basis {
            ProfitBasis::Asp => &self.asp,
            ProfitBasis::Awp => &self.awp,
        }
    }
}

/// Output of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtendedTable {
    pub records: Vec<ExtendedRecord>,
    /// Records handed to the pipeline.
    pub input_count: usize,
    /// Records removed by the `profitable_only` filter.
    pub filtered_out: usize,
    /// Records removed because their dose was missing and the policy excludes them.
    pub missing_dose_excluded: usize,
    /// Even per-record staffing split; `None` when not applied.
    pub staffing_share: Option<f64>,
    /// Whether COGS and revenue columns were computed.
    pub reports_revenue: bool,
}

impl ExtendedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
