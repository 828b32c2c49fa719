//! Normalized spreadsheet rows.

use serde::{Deserialize, Serialize};

use crate::basis::ProfitBasis;

/// One row of the uploaded profitability sheet after normalization.
///
/// Every numeric field has already been coerced: parse failures never reach
/// this type as errors, only as neutral values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugRecord {
    /// Zero-based position in the source table, used for stable ordering.
    pub row_index: usize,
    pub name: String,
    /// NDC with dashes removed.
    pub ndc: Option<String>,
    pub hcpcs: Option<String>,
    /// Strength text as it appeared in the sheet (e.g. "50 MG").
    pub strength_text: String,
    /// Leading numeric token of `strength_text`; `None` when the text has no number.
    pub dose_mg: Option<f64>,
    /// Units per package. Always positive; absent, zero or unreadable cells read as 1.
    pub unit_of_measure_code: f64,
    /// Dispense events over the reporting period. Never negative.
    pub rx_count: f64,
    /// Acquisition cost per unit, when the sheet carries it.
    pub purchase_price_per_unit: Option<f64>,
    pub asp_profit_per_unit: f64,
    pub awp_profit_per_unit: f64,
}

impl Default for DrugRecord {
    fn default() -> Self {
        Self {
            row_index: 0,
            name: String::new(),
            ndc: None,
            hcpcs: None,
            strength_text: String::new(),
            dose_mg: None,
            unit_of_measure_code: 1.0,
            rx_count: 0.0,
            purchase_price_per_unit: None,
            asp_profit_per_unit: 0.0,
            awp_profit_per_unit: 0.0,
        }
    }
}

impl DrugRecord {
    pub fn profit_per_unit(&self, basis: ProfitBasis) -> f64 {
        match basis {
            ProfitBasis::Asp => self.asp_profit_per_unit,
            ProfitBasis::Awp => self.awp_profit_per_unit,
        }
    }

    /// True when at least one basis earns a strictly positive profit per unit.
    pub fn is_profitable_per_unit(&self) -> bool {
        ProfitBasis::ALL
            .iter()
            .any(|basis| self.profit_per_unit(*basis) > 0.0)
    }
}
