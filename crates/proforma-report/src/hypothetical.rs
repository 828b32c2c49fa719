//! Revenue / profit / margin calculator, independent of any uploaded table.

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::summary::margin_pct;

/// Two known quantities; the third is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "known", rename_all = "snake_case")]
pub enum HypotheticalInput {
    RevenueAndProfit { revenue: f64, profit: f64 },
    RevenueAndMargin { revenue: f64, margin_pct: f64 },
    ProfitAndMargin { profit: f64, margin_pct: f64 },
}

impl HypotheticalInput {
    /// Pick the variant from whichever two values were supplied.
    ///
    /// # Errors
    ///
    /// Fails unless exactly two of the three values are present.
    pub fn from_parts(
        revenue: Option<f64>,
        profit: Option<f64>,
        margin_pct: Option<f64>,
    ) -> Result<Self> {
        match (revenue, profit, margin_pct) {
            (Some(revenue), Some(profit), None) => Ok(Self::RevenueAndProfit { revenue, profit }),
            (Some(revenue), None, Some(margin_pct)) => Ok(Self::RevenueAndMargin {
                revenue,
                margin_pct,
            }),
            (None, Some(profit), Some(margin_pct)) => Ok(Self::ProfitAndMargin {
                profit,
                margin_pct,
            }),
            _ => Err(ReportError::InvalidInput(
                "give exactly two of revenue, profit and margin".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HypotheticalResult {
    pub revenue: f64,
    pub profit: f64,
    /// `None` when revenue is zero.
    pub margin_pct: Option<f64>,
}

/// Derive the missing quantity.
///
/// `margin = profit / revenue * 100` and `profit = revenue * margin / 100`.
///
/// # Errors
///
/// [`ReportError::InvalidInput`] for non-finite values and
/// [`ReportError::DegenerateMargin`] when revenue would be derived from a
/// zero margin.
pub fn hypothetical(input: HypotheticalInput) -> Result<HypotheticalResult> {
    let result = match input {
        HypotheticalInput::RevenueAndProfit { revenue, profit } => {
            check_finite(&[revenue, profit])?;
            HypotheticalResult {
                revenue,
                profit,
                margin_pct: margin_pct(profit, revenue),
            }
        }
        HypotheticalInput::RevenueAndMargin {
            revenue,
            margin_pct,
        } => {
            check_finite(&[revenue, margin_pct])?;
            HypotheticalResult {
                revenue,
                profit: revenue * margin_pct / 100.0,
                margin_pct: Some(margin_pct),
            }
        }
        HypotheticalInput::ProfitAndMargin { profit, margin_pct } => {
            check_finite(&[profit, margin_pct])?;
            if margin_pct == 0.0 {
                return Err(ReportError::DegenerateMargin);
            }
            HypotheticalResult {
                revenue: profit * 100.0 / margin_pct,
                profit,
                margin_pct: Some(margin_pct),
            }
        }
    };
    Ok(result)
}

fn check_finite(values: &[f64]) -> Result<()> {
    match values.iter().find(|value| !value.is_finite()) {
        Some(value) => Err(ReportError::InvalidInput(format!(
            "expected a finite number, got {value}"
        ))),
        None => Ok(()),
    }
}
