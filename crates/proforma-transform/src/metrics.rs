//! Per-record derived metrics.
//!
//! For each basis (ASP and AWP):
//!
//! 1. `profit_per_rx = dose * profit_per_unit` (or `dose / uom * profit_per_unit`)
//! 2. `total_dispense_value = profit_per_rx * rx_count`
//! 3. `total_cogs = purchase_price * dose * rx_count`
//! 4. `revenue = total_cogs + total_dispense_value`
//! 5. `variable_cost = rx_count * (courier + misc)`
//! 6. `scenario_profit = total_dispense_value - variable_cost - staffing_share`
//! 7. `revenue_share_amount = scenario_profit * fraction`
//! 8. `net_profit = scenario_profit - revenue_share_amount`
//!
//! Steps 3 and 4 only run when the record carries a purchase price.

use proforma_model::{
    BasisMetrics, DoseNormalization, DrugRecord, ExtendedRecord, ExtendedTable, FilterStage,
    MissingDosePolicy, ProfitBasis, Result, Scenario, ScenarioConfig,
};

use crate::filter::{passes_after_costs, passes_before_costs};

/// Run the full derived-column pipeline over `records`.
///
/// The input is never modified; identical inputs give identical tables.
///
/// # Errors
///
/// Returns [`proforma_model::ModelError::InvalidConfig`] when `config` fails
/// validation. No other condition is an error.
pub fn compute_metrics(records: &[DrugRecord], config: &ScenarioConfig) -> Result<ExtendedTable> {
    config.validate()?;

    let mut missing_dose_excluded = 0;
    let mut filtered_out = 0;
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        if record.dose_mg.is_none() && config.missing_dose == MissingDosePolicy::Exclude {
            missing_dose_excluded += 1;
            tracing::trace!(row = record.row_index, "dose missing, row excluded");
            continue;
        }
        if config.profitable_only
            && config.filter_stage == FilterStage::BeforeCosts
            && !passes_before_costs(record)
        {
            filtered_out += 1;
            continue;
        }
        let row = costed_record(record, config);
        if config.profitable_only
            && config.filter_stage == FilterStage::AfterCosts
            && !passes_after_costs(&row)
        {
            filtered_out += 1;
            continue;
        }
        rows.push(row);
    }

    let staffing_share = match config.scenario {
        Scenario::SelfStaffed if !rows.is_empty() => {
            Some(config.total_staffing_cost() / rows.len() as f64)
        }
        Scenario::SelfStaffed => {
            tracing::debug!("no records left, staffing split skipped");
            None
        }
        Scenario::Managed => None,
    };
    for row in &mut rows {
        settle(row, staffing_share.unwrap_or(0.0), config);
    }

    if missing_dose_excluded > 0 {
        tracing::warn!(
            rows = missing_dose_excluded,
            "rows without a readable dose were excluded"
        );
    }
    tracing::debug!(
        input = records.len(),
        output = rows.len(),
        filtered_out,
        staffing_share = staffing_share.unwrap_or(0.0),
        "metrics computed"
    );

    Ok(ExtendedTable {
        reports_revenue: rows.iter().any(|row| row.total_cogs.is_some()),
        records: rows,
        input_count: records.len(),
        filtered_out,
        missing_dose_excluded,
        staffing_share,
    })
}

/// Steps 1-6 without the staffing split.
fn costed_record(record: &DrugRecord, config: &ScenarioConfig) -> ExtendedRecord {
    let dose = record.dose_mg.unwrap_or(0.0);
    let rx = record.rx_count;
    // Same fallback as the sheet parser, for records built by hand.
    let units = match record.unit_of_measure_code {
        units if units > 0.0 && units.is_finite() => units,
        _ => 1.0,
    };
    let scaled_dose = match config.dose_normalization {
        DoseNormalization::Flat => dose,
        DoseNormalization::PerUnitOfMeasure => dose / units,
    };

    let courier_cost = rx * config.courier_cost_per_rx;
    let misc_cost = rx * config.misc_cost_per_rx;
    let variable_cost = rx * config.variable_cost_per_rx();
    let total_cogs = record.purchase_price_per_unit.map(|price| price * dose * rx);

    let metrics_for = |basis: ProfitBasis| {
        let profit_per_unit = record.profit_per_unit(basis);
        let profit_per_rx = scaled_dose * profit_per_unit;
        let total_dispense_value = profit_per_rx * rx;
        BasisMetrics {
            profit_per_unit,
            profit_per_rx,
            total_dispense_value,
            revenue: total_cogs.map(|cogs| cogs + total_dispense_value),
            scenario_profit: total_dispense_value - variable_cost,
            revenue_share_amount: 0.0,
            net_profit: 0.0,
        }
    };

    ExtendedRecord {
        record: record.clone(),
        total_cogs,
        courier_cost,
        misc_cost,
        variable_cost,
        staffing_share: 0.0,
        asp: metrics_for(ProfitBasis::Asp),
        awp: metrics_for(ProfitBasis::Awp),
    }
}

/// Steps 6-8: apply the staffing split, then the revenue share.
fn settle(row: &mut ExtendedRecord, staffing_share: f64, config: &ScenarioConfig) {
    row.staffing_share = staffing_share;
    for basis in ProfitBasis::ALL {
        let metrics = match basis {
            ProfitBasis::Asp => &mut row.asp,
            ProfitBasis::Awp => &mut row.awp,
        };
        metrics.scenario_profit -= staffing_share;
        metrics.revenue_share_amount = if config.share_basis.applies_to(basis) {
            metrics.scenario_profit * config.revenue_share_fraction
        } else {
            0.0
        };
        metrics.net_profit = metrics.scenario_profit - metrics.revenue_share_amount;
    }
}
