//! Raw table → typed [`DrugRecord`]s.

use std::collections::BTreeMap;

use proforma_model::{ColumnSchema, DrugRecord, Field, ProfitBasis, ScenarioConfig};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::normalization::{
    has_digits, normalize_ndc, normalize_text, parse_currency, parse_dose, parse_rx_count,
    parse_unit_of_measure,
};
use crate::schema::{ResolvedColumns, required_fields, resolve_columns};
use crate::table::RawTable;

/// Per-field count of cells that were replaced by a neutral value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionReport {
    pub counts: BTreeMap<Field, usize>,
}

impl CoercionReport {
    pub fn record(&mut self, field: Field) {
        *self.counts.entry(field).or_insert(0) += 1;
    }

    pub fn count(&self, field: Field) -> usize {
        self.counts.get(&field).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Records ready for the metrics pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    pub records: Vec<DrugRecord>,
    pub columns: ResolvedColumns,
    pub coercions: CoercionReport,
}

/// Validate the schema against `config` and coerce every row.
///
/// Cells that cannot be read become neutral values (0, or 1 for unit of
/// measure) and are tallied in the returned [`CoercionReport`].
///
/// # Errors
///
/// Fails on an invalid `config` or when a column it requires is missing.
pub fn normalize_table(
    table: &RawTable,
    schema: &ColumnSchema,
    config: &ScenarioConfig,
) -> Result<NormalizedTable> {
    config.validate()?;
    let columns = resolve_columns(table, schema, &required_fields(config))?;

    let mut coercions = CoercionReport::default();
    let mut records = Vec::with_capacity(table.height());
    for (row_index, row) in table.rows.iter().enumerate() {
        let mut cells = RowCells {
            row,
            columns: &columns,
            row_index,
            coercions: &mut coercions,
        };
        records.push(cells.to_record(config));
    }

    for (field, count) in &coercions.counts {
        tracing::warn!(field = %field, cells = count, "coerced unreadable cells");
    }
    tracing::debug!(
        rows = records.len(),
        coerced = coercions.total(),
        derived_profit = config.profit_source.is_derived(),
        "table normalized"
    );

    Ok(NormalizedTable {
        records,
        columns,
        coercions,
    })
}

struct RowCells<'a> {
    row: &'a [String],
    columns: &'a ResolvedColumns,
    row_index: usize,
    coercions: &'a mut CoercionReport,
}

impl<'a> RowCells<'a> {
    fn get(&self, field: Field) -> Option<&'a str> {
        self.columns
            .get(field)
            .and_then(|idx| self.row.get(idx))
            .map(String::as_str)
    }

    fn coerced(&mut self, field: Field) {
        tracing::trace!(row = self.row_index, field = %field, "cell coerced");
        self.coercions.record(field);
    }

    fn currency(&mut self, field: Field) -> Option<f64> {
        let cell = self.get(field)?;
        let unreadable = !cell.is_empty() && !has_digits(cell);
        match parse_currency(cell) {
            Some(value) if !unreadable => Some(value),
            _ => {
                self.coerced(field);
                Some(0.0)
            }
        }
    }

    fn to_record(&mut self, config: &ScenarioConfig) -> DrugRecord {
        let name = self.get(Field::Name).and_then(normalize_text).unwrap_or_default();
        let ndc = self.get(Field::Ndc).and_then(normalize_ndc);
        let hcpcs = self.get(Field::Hcpcs).and_then(normalize_text);
        let strength_text = self.get(Field::Strength).unwrap_or_default().to_string();

        let dose_mg = parse_dose(&strength_text);
        if dose_mg.is_none() {
            self.coerced(Field::Strength);
        }

        let unit_of_measure_code = match self.get(Field::UnitOfMeasure) {
            Some(cell) => {
                let units = parse_unit_of_measure(cell);
                if !cell.is_empty() && units == 1.0 && parse_dose(cell) != Some(1.0) {
                    self.coerced(Field::UnitOfMeasure);
                }
                units
            }
            None => 1.0,
        };

        let rx = parse_rx_count(self.get(Field::RxCount).unwrap_or_default());
        if rx.was_coerced() {
            self.coerced(Field::RxCount);
        }

        let purchase_price_per_unit = self.currency(Field::PurchasePrice);
        let (asp_profit_per_unit, awp_profit_per_unit) = if config.profit_source.is_derived() {
            let price = purchase_price_per_unit.unwrap_or(0.0);
            let derive = |basis| config.profit_source.derive(price, basis).unwrap_or(0.0);
            (derive(ProfitBasis::Asp), derive(ProfitBasis::Awp))
        } else {
            (
                self.currency(Field::AspProfit).unwrap_or(0.0),
                self.currency(Field::AwpProfit).unwrap_or(0.0),
            )
        };

        DrugRecord {
            row_index: self.row_index,
            name,
            ndc,
            hcpcs,
            strength_text,
            dose_mg,
            unit_of_measure_code,
            rx_count: rx.value(),
            purchase_price_per_unit,
            asp_profit_per_unit,
            awp_profit_per_unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proforma_model::{DoseNormalization, ProfitSource};

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| (*h).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        )
    }

    const SHEET: &[&str] = &[
        "Drug Name",
        "NDC",
        "Strength",
        "Rx Count",
        "ASP Profit/Loss",
        "AWP Profit/Loss",
    ];

    #[test]
    fn test_sheet_row_is_normalized() {
        let table = table(
            SHEET,
            &[&["ALPHA", "0002-1433-80", "50 MG", "1,200", "$1.25", "($0.50)"]],
        );
        let out = normalize_table(&table, &ColumnSchema::new(), &ScenarioConfig::default())
            .unwrap();

        let record = &out.records[0];
        assert_eq!(record.name, "ALPHA");
        assert_eq!(record.ndc.as_deref(), Some("0002143380"));
        assert_eq!(record.dose_mg, Some(50.0));
        assert_eq!(record.rx_count, 1200.0);
        assert_eq!(record.asp_profit_per_unit, 1.25);
        assert_eq!(record.awp_profit_per_unit, -0.5);
        assert_eq!(record.unit_of_measure_code, 1.0);
        assert_eq!(record.purchase_price_per_unit, None);
        assert!(out.coercions.is_empty());
    }

    #[test]
    fn test_unreadable_cells_are_counted() {
        let table = table(
            SHEET,
            &[
                &["ALPHA", "", "N/A", "-4", "N/A", "1.2.3"],
                &["BETA", "", "10 MG", "abc", "$2", "$3"],
            ],
        );
        let out = normalize_table(&table, &ColumnSchema::new(), &ScenarioConfig::default())
            .unwrap();

        assert_eq!(out.records[0].dose_mg, None);
        assert_eq!(out.records[0].rx_count, 0.0);
        assert_eq!(out.records[0].asp_profit_per_unit, 0.0);
        assert_eq!(out.records[0].awp_profit_per_unit, 0.0);
        assert_eq!(out.coercions.count(Field::Strength), 1);
        assert_eq!(out.coercions.count(Field::RxCount), 2);
        assert_eq!(out.coercions.count(Field::AspProfit), 1);
        assert_eq!(out.coercions.count(Field::AwpProfit), 1);
        assert_eq!(out.coercions.total(), 5);
    }

    #[test]
    fn test_derived_profits_from_purchase_price() {
        let table = table(
            &["Drug Name", "Strength", "Rx Count", "Purchase Price"],
            &[&["ALPHA", "10 MG", "3", "$100.00"]],
        );
        let config = ScenarioConfig::new().with_profit_source(ProfitSource::derived());
        let out = normalize_table(&table, &ColumnSchema::new(), &config).unwrap();

        let record = &out.records[0];
        assert_eq!(record.purchase_price_per_unit, Some(100.0));
        assert!((record.asp_profit_per_unit - 4.0).abs() < 1e-9);
        assert!((record.awp_profit_per_unit + 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_of_measure_column() {
        let table = table(
            &[
                "Drug Name",
                "Strength",
                "Unit of Measure",
                "Rx Count",
                "ASP Profit/Loss",
                "AWP Profit/Loss",
            ],
            &[
                &["ALPHA", "100 MG", "30 EA", "1", "1", "1"],
                &["BETA", "100 MG", "0", "1", "1", "1"],
            ],
        );
        let config =
            ScenarioConfig::new().with_dose_normalization(DoseNormalization::PerUnitOfMeasure);
        let out = normalize_table(&table, &ColumnSchema::new(), &config).unwrap();

        assert_eq!(out.records[0].unit_of_measure_code, 30.0);
        assert_eq!(out.records[1].unit_of_measure_code, 1.0);
        assert_eq!(out.coercions.count(Field::UnitOfMeasure), 1);
    }

    #[test]
    fn test_invalid_config_rejected_before_rows() {
        let table = table(SHEET, &[]);
        let config = ScenarioConfig::new().with_revenue_share(2.0);
        assert!(normalize_table(&table, &ColumnSchema::new(), &config).is_err());
    }
}
