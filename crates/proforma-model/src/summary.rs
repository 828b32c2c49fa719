use serde::{Deserialize, Serialize};

use crate::basis::ProfitBasis;
use crate::options::{Scenario, ShareBasis};

/// Column totals for one profit basis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BasisTotals {
    pub total_dispense_value: f64,
    pub revenue: Option<f64>,
    pub scenario_profit: f64,
    /// Partner share: the revenue-share amount.
    pub revenue_share_amount: f64,
    /// Dispenser share: scenario profit after the revenue share.
    pub net_profit: f64,
    /// `scenario_profit / revenue * 100`; `None` when revenue is absent or zero.
    pub overall_margin_pct: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostTotals {
    pub courier: f64,
    pub misc: f64,
    pub variable: f64,
    pub staffing: f64,
    pub cogs: Option<f64>,
}

/// A drug name with its summed profit, as shown in the top-N ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDrug {
    pub rank: usize,
    pub name: String,
    pub total_profit: f64,
    pub rx_count: f64,
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub scenario: Scenario,
    pub share_basis: ShareBasis,
    pub revenue_share_fraction: f64,
    pub input_count: usize,
    pub record_count: usize,
    pub filtered_out: usize,
    pub missing_dose_excluded: usize,
    pub total_rx: f64,
    pub costs: CostTotals,
    pub asp: BasisTotals,
    pub awp: BasisTotals,
    pub ranking_basis: ProfitBasis,
    pub top_drugs: Vec<RankedDrug>,
}

impl Summary {
    pub fn basis(&self, basis: ProfitBasis) -> &BasisTotals {
        match basis {
            ProfitBasis::Asp => &self.asp,
            ProfitBasis::Awp => &self.awp,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}
