//! `profitable_only` predicates.

use proforma_model::{DrugRecord, ExtendedRecord, ProfitBasis};

/// Either basis earns a positive profit per unit.
pub fn passes_before_costs(record: &DrugRecord) -> bool {
    record.is_profitable_per_unit()
}

/// Either basis stays positive once variable costs are paid.
///
/// Must be called before the staffing split is applied.
pub fn passes_after_costs(row: &ExtendedRecord) -> bool {
    ProfitBasis::ALL.iter().any(|basis| {
        let metrics = row.basis(*basis);
        metrics.total_dispense_value - row.variable_cost > 0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_profit_is_not_profitable() {
        let record = DrugRecord::default();
        assert!(!passes_before_costs(&record));

        let record = DrugRecord {
            awp_profit_per_unit: 0.01,
            ..DrugRecord::default()
        };
        assert!(passes_before_costs(&record));
    }
}
