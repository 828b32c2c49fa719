//! Extended table as a Polars DataFrame.
//!
//! Sheet columns come first, then the derived columns in pipeline
//! order. COGS and revenue columns are only present when the table carries
//! purchase prices.

use polars::prelude::{Column, DataFrame, PolarsResult};
use proforma_model::{BasisMetrics, ExtendedRecord, ExtendedTable, ProfitBasis};

/// Export column names.
pub mod columns {
    pub const DRUG_NAME: &str = "Drug Name";
    pub const HCPCS: &str = "HCPCS";
    pub const NDC: &str = "NDC";
    pub const STRENGTH: &str = "Strength";
    pub const DOSE_MG: &str = "Dose_MG";
    pub const UNIT_OF_MEASURE: &str = "Unit of Measure";
    pub const RX_COUNT: &str = "Rx Count";
    pub const PURCHASE_PRICE: &str = "Purchase Price";
    pub const TOTAL_COGS: &str = "Total COGS";
    pub const COURIER_COST: &str = "Courier Cost";
    pub const MISC_COST: &str = "Misc Cost";
    pub const VARIABLE_COST: &str = "Variable Cost";
    pub const STAFFING_SHARE: &str = "Staffing Share";
}

/// Name of a per-basis derived column, e.g. `"ASP Net Profit"`.
pub fn basis_column(basis: ProfitBasis, metric: &str) -> String {
    format!("{} {metric}", basis.label())
}

const PROFIT_PER_UNIT: &str = "Profit/Loss";
const PROFIT_PER_RX: &str = "Profit per Rx";
const DISPENSE_TOTAL: &str = "Dispense Total";
const REVENUE: &str = "Revenue";
const SCENARIO_PROFIT: &str = "Scenario Profit";
const REVENUE_SHARE: &str = "Revenue Share";
const NET_PROFIT: &str = "Net Profit";

fn f64_column(
    name: &str,
    rows: &[ExtendedRecord],
    value: impl Fn(&ExtendedRecord) -> f64,
) -> Column {
    Column::new(name.into(), rows.iter().map(value).collect::<Vec<f64>>())
}

fn opt_f64_column(
    name: &str,
    rows: &[ExtendedRecord],
    value: impl Fn(&ExtendedRecord) -> Option<f64>,
) -> Column {
    Column::new(name.into(), rows.iter().map(value).collect::<Vec<Option<f64>>>())
}

fn text_column(
    name: &str,
    rows: &[ExtendedRecord],
    value: impl Fn(&ExtendedRecord) -> Option<String>,
) -> Column {
    Column::new(name.into(), rows.iter().map(value).collect::<Vec<Option<String>>>())
}

fn basis_columns(
    basis: ProfitBasis,
    rows: &[ExtendedRecord],
    with_revenue: bool,
    out: &mut Vec<Column>,
) {
    let metric = |row: &ExtendedRecord| -> BasisMetrics { *row.basis(basis) };
    out.push(f64_column(&basis_column(basis, PROFIT_PER_UNIT), rows, |row| {
        metric(row).profit_per_unit
    }));
    out.push(f64_column(&basis_column(basis, PROFIT_PER_RX), rows, |row| {
        metric(row).profit_per_rx
    }));
    out.push(f64_column(&basis_column(basis, DISPENSE_TOTAL), rows, |row| {
        metric(row).total_dispense_value
    }));
    if with_revenue {
        out.push(opt_f64_column(&basis_column(basis, REVENUE), rows, |row| {
            metric(row).revenue
        }));
    }
    out.push(f64_column(&basis_column(basis, SCENARIO_PROFIT), rows, |row| {
        metric(row).scenario_profit
    }));
    out.push(f64_column(&basis_column(basis, REVENUE_SHARE), rows, |row| {
        metric(row).revenue_share_amount
    }));
    out.push(f64_column(&basis_column(basis, NET_PROFIT), rows, |row| {
        metric(row).net_profit
    }));
}

/// Build the export frame for `table`.
///
/// # Errors
///
/// Propagates Polars errors from frame construction.
pub fn extended_frame(table: &ExtendedTable) -> PolarsResult<DataFrame> {
    let rows = table.records.as_slice();
    let with_revenue = table.reports_revenue;

    let mut out = vec![
        text_column(columns::DRUG_NAME, rows, |row| Some(row.record.name.clone())),
        text_column(columns::HCPCS, rows, |row| row.record.hcpcs.clone()),
        text_column(columns::NDC, rows, |row| row.record.ndc.clone()),
        text_column(columns::STRENGTH, rows, |row| {
            Some(row.record.strength_text.clone())
        }),
        opt_f64_column(columns::DOSE_MG, rows, |row| row.record.dose_mg),
        f64_column(columns::UNIT_OF_MEASURE, rows, |row| {
            row.record.unit_of_measure_code
        }),
        f64_column(columns::RX_COUNT, rows, |row| row.record.rx_count),
    ];
    if with_revenue {
        out.push(opt_f64_column(columns::PURCHASE_PRICE, rows, |row| {
            row.record.purchase_price_per_unit
        }));
        out.push(opt_f64_column(columns::TOTAL_COGS, rows, |row| row.total_cogs));
    }
    out.push(f64_column(columns::COURIER_COST, rows, |row| row.courier_cost));
    out.push(f64_column(columns::MISC_COST, rows, |row| row.misc_cost));
    out.push(f64_column(columns::VARIABLE_COST, rows, |row| row.variable_cost));
    out.push(f64_column(columns::STAFFING_SHARE, rows, |row| {
        row.staffing_share
    }));
    for basis in ProfitBasis::ALL {
        basis_columns(basis, rows, with_revenue, &mut out);
    }

    DataFrame::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proforma_model::{DrugRecord, ScenarioConfig};

    use crate::compute_metrics;

    fn sample(price: Option<f64>) -> ExtendedTable {
        let records = [DrugRecord {
            name: "ALPHA".to_string(),
            strength_text: "10 MG".to_string(),
            dose_mg: Some(10.0),
            rx_count: 2.0,
            purchase_price_per_unit: price,
            asp_profit_per_unit: 1.0,
            awp_profit_per_unit: 0.5,
            ..DrugRecord::default()
        }];
        compute_metrics(&records, &ScenarioConfig::default()).unwrap()
    }

    #[test]
    fn frame_has_one_row_per_record() {
        let df = extended_frame(&sample(None)).unwrap();

        assert_eq!(df.height(), 1);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(names.contains(&"ASP Net Profit".to_string()));
        assert!(names.contains(&"AWP Dispense Total".to_string()));
        assert!(!names.contains(&"Total COGS".to_string()));
    }

    #[test]
    fn revenue_columns_need_purchase_price() {
        let df = extended_frame(&sample(Some(2.0))).unwrap();

        let cogs = df.column(columns::TOTAL_COGS).unwrap();
        assert_eq!(cogs.f64().unwrap().get(0), Some(40.0));
        assert!(df.column("AWP Revenue").is_ok());
    }

    #[test]
    fn empty_table_builds_empty_frame() {
        let df = extended_frame(&ExtendedTable::default()).unwrap();
        assert_eq!(df.height(), 0);
        assert!(df.column(columns::DRUG_NAME).is_ok());
    }
}
