//! Scenario configuration for the pro forma pipeline.

use serde::{Deserialize, Serialize};

use crate::basis::ProfitBasis;
use crate::error::{ModelError, Result};

/// Reimbursement multiplier applied to purchase price for the ASP basis.
pub const DEFAULT_ASP_MULTIPLIER: f64 = 1.04;

/// Reimbursement multiplier applied to purchase price for the AWP basis.
pub const DEFAULT_AWP_MULTIPLIER: f64 = 0.81;

/// Courier cost charged per prescription when none is configured.
pub const DEFAULT_COURIER_COST_PER_RX: f64 = 8.0;

/// Revenue share retained by the managing partner.
pub const DEFAULT_REVENUE_SHARE_FRACTION: f64 = 0.20;

/// Number of drugs shown in the profit ranking.
pub const DEFAULT_TOP_N: usize = 5;

/// How profit per unit scales to profit per prescription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoseNormalization {
    /// `profit_per_rx = dose_mg * profit_per_unit`.
    #[default]
    Flat,
    /// `profit_per_rx = (dose_mg / unit_of_measure_code) * profit_per_unit`.
    PerUnitOfMeasure,
}

/// Where per-unit profit figures come from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfitSource {
    /// Read `ASP Profit/Loss` and `AWP Profit/Loss` straight from the sheet.
    #[default]
    Sheet,
    /// Derive both from purchase price: `price * multiplier - price`.
    Derived {
        asp_multiplier: f64,
        awp_multiplier: f64,
    },
}

impl ProfitSource {
    /// Derived profits with the standard reimbursement multipliers.
    pub fn derived() -> Self {
        Self::Derived {
            asp_multiplier: DEFAULT_ASP_MULTIPLIER,
            awp_multiplier: DEFAULT_AWP_MULTIPLIER,
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, Self::Derived { .. })
    }

    /// Profit per unit for a purchase price, or `None` for sheet-sourced profits.
    pub fn derive(&self, purchase_price: f64, basis: ProfitBasis) -> Option<f64> {
        match *self {
            Self::Sheet => None,
            Self::Derived {
                asp_multiplier,
                awp_multiplier,
            } => {
                let multiplier = match basis {
                    ProfitBasis::Asp => asp_multiplier,
                    ProfitBasis::Awp => awp_multiplier,
                };
                Some(purchase_price * multiplier - purchase_price)
            }
        }
    }
}

/// What to do with rows whose strength text carries no number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDosePolicy {
    /// Treat the dose as 0; the row contributes no dispense value.
    #[default]
    Zero,
    /// Drop the row before metrics are computed.
    Exclude,
}

/// When the `profitable_only` filter is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStage {
    /// Keep rows where either per-unit profit is positive.
    #[default]
    BeforeCosts,
    /// Keep rows where either basis is positive after variable costs.
    AfterCosts,
}

/// Operating model the scenario profit is computed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Partner supplies staff; only per-Rx variable costs are deducted.
    #[default]
    Managed,
    /// Practice staffs the pharmacy; staffing costs are split evenly across rows.
    SelfStaffed,
}

/// Which profit basis the revenue share is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareBasis {
    Asp,
    Awp,
    /// Apply the share to each basis independently.
    #[default]
    Both,
}

impl ShareBasis {
    pub fn applies_to(self, basis: ProfitBasis) -> bool {
        match self {
            ShareBasis::Both => true,
            ShareBasis::Asp => basis == ProfitBasis::Asp,
            ShareBasis::Awp => basis == ProfitBasis::Awp,
        }
    }
}

/// Immutable input bundle for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub courier_cost_per_rx: f64,
    pub misc_cost_per_rx: f64,
    /// Fraction of scenario profit paid out as revenue share (0..=1).
    pub revenue_share_fraction: f64,
    pub pharmacist_cost_total: Option<f64>,
    pub technician_cost_total: Option<f64>,
    pub emr_cost_total: Option<f64>,
    pub psao_cost_total: Option<f64>,
    pub profitable_only: bool,
    pub filter_stage: FilterStage,
    pub scenario: Scenario,
    pub dose_normalization: DoseNormalization,
    pub profit_source: ProfitSource,
    pub missing_dose: MissingDosePolicy,
    pub share_basis: ShareBasis,
    pub ranking_basis: ProfitBasis,
    pub top_n: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            courier_cost_per_rx: DEFAULT_COURIER_COST_PER_RX,
            misc_cost_per_rx: 0.0,
            revenue_share_fraction: DEFAULT_REVENUE_SHARE_FRACTION,
            pharmacist_cost_total: None,
            technician_cost_total: None,
            emr_cost_total: None,
            psao_cost_total: None,
            profitable_only: false,
            filter_stage: FilterStage::default(),
            scenario: Scenario::default(),
            dose_normalization: DoseNormalization::default(),
            profit_source: ProfitSource::default(),
            missing_dose: MissingDosePolicy::default(),
            share_basis: ShareBasis::default(),
            ranking_basis: ProfitBasis::Awp,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ScenarioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_courier_cost(mut self, per_rx: f64) -> Self {
        self.courier_cost_per_rx = per_rx;
        self
    }

    #[must_use]
    pub fn with_misc_cost(mut self, per_rx: f64) -> Self {
        self.misc_cost_per_rx = per_rx;
        self
    }

    #[must_use]
    pub fn with_revenue_share(mut self, fraction: f64) -> Self {
        self.revenue_share_fraction = fraction;
        self
    }

    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }

    #[must_use]
    pub fn with_profitable_only(mut self, enable: bool) -> Self {
        self.profitable_only = enable;
        self
    }

    #[must_use]
    pub fn with_filter_stage(mut self, stage: FilterStage) -> Self {
        self.filter_stage = stage;
        self
    }

    #[must_use]
    pub fn with_dose_normalization(mut self, normalization: DoseNormalization) -> Self {
        self.dose_normalization = normalization;
        self
    }

    #[must_use]
    pub fn with_profit_source(mut self, source: ProfitSource) -> Self {
        self.profit_source = source;
        self
    }

    #[must_use]
    pub fn with_missing_dose(mut self, policy: MissingDosePolicy) -> Self {
        self.missing_dose = policy;
        self
    }

    #[must_use]
    pub fn with_share_basis(mut self, basis: ShareBasis) -> Self {
        self.share_basis = basis;
        self
    }

    #[must_use]
    pub fn with_ranking_basis(mut self, basis: ProfitBasis) -> Self {
        self.ranking_basis = basis;
        self
    }

    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Set all four staffing totals at once.
    #[must_use]
    pub fn with_staffing(
        mut self,
        pharmacist: Option<f64>,
        technician: Option<f64>,
        emr: Option<f64>,
        psao: Option<f64>,
    ) -> Self {
        self.pharmacist_cost_total = pharmacist;
        self.technician_cost_total = technician;
        self.emr_cost_total = emr;
        self.psao_cost_total = psao;
        self
    }

    /// Sum of the staffing totals that are set.
    pub fn total_staffing_cost(&self) -> f64 {
        self.staffing_costs()
            .iter()
            .filter_map(|(_, value)| *value)
            .sum()
    }

    /// Variable cost charged per dispense event.
    pub fn variable_cost_per_rx(&self) -> f64 {
        self.courier_cost_per_rx + self.misc_cost_per_rx
    }

    fn staffing_costs(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("pharmacist_cost_total", self.pharmacist_cost_total),
            ("technician_cost_total", self.technician_cost_total),
            ("emr_cost_total", self.emr_cost_total),
            ("psao_cost_total", self.psao_cost_total),
        ]
    }

    /// Check value ranges. Run once per pipeline pass before any arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_cost("courier_cost_per_rx", self.courier_cost_per_rx)?;
        check_cost("misc_cost_per_rx", self.misc_cost_per_rx)?;
        for (field, value) in self.staffing_costs() {
            if let Some(value) = value {
                check_cost(field, value)?;
            }
        }
        let fraction = self.revenue_share_fraction;
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(ModelError::invalid(
                "revenue_share_fraction",
                format!("must be between 0 and 1, got {fraction}"),
            ));
        }
        if self.top_n == 0 {
            return Err(ModelError::invalid("top_n", "must be at least 1"));
        }
        if let ProfitSource::Derived {
            asp_multiplier,
            awp_multiplier,
        } = self.profit_source
        {
            for (field, value) in [
                ("asp_multiplier", asp_multiplier),
                ("awp_multiplier", awp_multiplier),
            ] {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ModelError::invalid(
                        field,
                        format!("must be a positive number, got {value}"),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn check_cost(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::invalid(
            field,
            format!("must be a non-negative number, got {value}"),
        ));
    }
    Ok(())
}
