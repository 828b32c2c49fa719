//! Explicit schema validation: map logical fields to header positions.

use std::collections::BTreeMap;

use proforma_model::{
    ColumnSchema, DoseNormalization, Field, HeaderLookup, ProfitBasis, ProfitSource,
    ScenarioConfig,
};

use crate::error::{IngestError, Result};
use crate::table::RawTable;

/// Header positions for every field found in a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    positions: BTreeMap<Field, (usize, String)>,
}

impl ResolvedColumns {
    pub fn get(&self, field: Field) -> Option<usize> {
        self.positions.get(&field).map(|(idx, _)| *idx)
    }

    /// The header text that matched `field`.
    pub fn header(&self, field: Field) -> Option<&str> {
        self.positions.get(&field).map(|(_, name)| name.as_str())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.positions.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, usize, &str)> {
        self.positions
            .iter()
            .map(|(field, (idx, name))| (*field, *idx, name.as_str()))
    }
}

/// Fields that must be present for `config` to run.
pub fn required_fields(config: &ScenarioConfig) -> Vec<Field> {
    let mut fields = vec![Field::Name, Field::Strength, Field::RxCount];
    if config.dose_normalization == DoseNormalization::PerUnitOfMeasure {
        fields.push(Field::UnitOfMeasure);
    }
    match config.profit_source {
        ProfitSource::Sheet => fields.extend(ProfitBasis::ALL.map(Field::profit)),
        ProfitSource::Derived { .. } => fields.push(Field::PurchasePrice),
    }
    fields
}

/// Locate every known field in `table`.
///
/// # Errors
///
/// Returns [`IngestError::MissingColumn`] for the first field in `required`
/// that matches no accepted header. Absent optional fields are simply left out.
pub fn resolve_columns(
    table: &RawTable,
    schema: &ColumnSchema,
    required: &[Field],
) -> Result<ResolvedColumns> {
    let lookup = HeaderLookup::new(&table.headers);
    let mut positions = BTreeMap::new();
    for field in Field::ALL {
        let candidates = schema.candidates(field);
        let found = candidates
            .iter()
            .find_map(|name| lookup.position(name))
            .map(|idx| (idx, table.headers[idx].clone()));
        match found {
            Some(position) => {
                positions.insert(field, position);
            }
            None if required.contains(&field) => {
                return Err(IngestError::MissingColumn {
                    field,
                    expected: candidates[0].to_string(),
                    accepted: candidates.join(", "),
                });
            }
            None => {}
        }
    }
    Ok(ResolvedColumns { positions })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str]) -> RawTable {
        RawTable::new(headers.iter().map(|h| (*h).to_string()).collect(), vec![])
    }

    #[test]
    fn test_resolves_canonical_and_alias_headers() {
        let table = table(&["medication name", "Strength", "RX COUNT", "ASP Profit", "AWP Profit/Loss"]);
        let config = ScenarioConfig::default();
        let columns = resolve_columns(&table, &ColumnSchema::new(), &required_fields(&config))
            .unwrap();

        assert_eq!(columns.get(Field::Name), Some(0));
        assert_eq!(columns.header(Field::Name), Some("medication name"));
        assert_eq!(columns.get(Field::AspProfit), Some(3));
        assert!(!columns.contains(Field::PurchasePrice));
    }

    #[test]
    fn test_missing_required_column_is_reported() {
        let table = table(&["Drug Name", "Strength", "ASP Profit/Loss", "AWP Profit/Loss"]);
        let config = ScenarioConfig::default();
        let err = resolve_columns(&table, &ColumnSchema::new(), &required_fields(&config))
            .unwrap_err();

        match err {
            IngestError::MissingColumn { field, expected, .. } => {
                assert_eq!(field, Field::RxCount);
                assert_eq!(expected, "Rx Count");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_override_disables_aliases() {
        let table = table(&["Medication", "Strength", "Rx Count", "ASP Profit/Loss", "AWP Profit/Loss"]);
        let schema = ColumnSchema::new().with_override(Field::Name, "Product");
        let err = resolve_columns(&table, &schema, &[Field::Name]).unwrap_err();

        assert!(matches!(
            err,
            IngestError::MissingColumn { field: Field::Name, ref expected, .. } if expected == "Product"
        ));
    }

    #[test]
    fn test_required_fields_follow_policies() {
        let derived = ScenarioConfig::new()
            .with_profit_source(ProfitSource::derived())
            .with_dose_normalization(DoseNormalization::PerUnitOfMeasure);
        let fields = required_fields(&derived);

        assert!(fields.contains(&Field::PurchasePrice));
        assert!(fields.contains(&Field::UnitOfMeasure));
        assert!(!fields.contains(&Field::AspProfit));
    }

    #[test]
    fn test_sheet_profits_require_both_profit_columns() {
        let fields = required_fields(&ScenarioConfig::default());

        assert!(fields.contains(&Field::AspProfit));
        assert!(fields.contains(&Field::AwpProfit));
        assert!(!fields.contains(&Field::PurchasePrice));
    }
}
