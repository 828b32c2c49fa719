//! Table totals and the top-N profit ranking.

use std::collections::HashMap;

use proforma_model::{
    BasisTotals, CostTotals, ExtendedTable, ProfitBasis, RankedDrug, ScenarioConfig, Summary,
};

/// Reduce an extended table to scalar totals.
///
/// Totals are plain sums over every record, so they are order independent
/// up to floating point rounding.
pub fn summarize(table: &ExtendedTable, config: &ScenarioConfig) -> Summary {
    let records = &table.records;
    let cogs = table
        .reports_revenue
        .then(|| records.iter().filter_map(|row| row.total_cogs).sum::<f64>());
    let costs = CostTotals {
        courier: records.iter().map(|row| row.courier_cost).sum(),
        misc: records.iter().map(|row| row.misc_cost).sum(),
        variable: records.iter().map(|row| row.variable_cost).sum(),
        staffing: records.iter().map(|row| row.staffing_share).sum(),
        cogs,
    };

    let summary = Summary {
        scenario: config.scenario,
        share_basis: config.share_basis,
        revenue_share_fraction: config.revenue_share_fraction,
        input_count: table.input_count,
        record_count: table.len(),
        filtered_out: table.filtered_out,
        missing_dose_excluded: table.missing_dose_excluded,
        total_rx: records.iter().map(|row| row.record.rx_count).sum(),
        costs,
        asp: basis_totals(table, ProfitBasis::Asp),
        awp: basis_totals(table, ProfitBasis::Awp),
        ranking_basis: config.ranking_basis,
        top_drugs: top_n_by_profit(table, config.ranking_basis, config.top_n),
    };
    tracing::debug!(
        records = summary.record_count,
        asp_net = summary.asp.net_profit,
        awp_net = summary.awp.net_profit,
        "summary computed"
    );
    summary
}

fn basis_totals(table: &ExtendedTable, basis: ProfitBasis) -> BasisTotals {
    let mut totals = BasisTotals::default();
    let mut revenue = 0.0;
    for row in &table.records {
        let metrics = row.basis(basis);
        totals.total_dispense_value += metrics.total_dispense_value;
        totals.scenario_profit += metrics.scenario_profit;
        totals.revenue_share_amount += metrics.revenue_share_amount;
        totals.net_profit += metrics.net_profit;
        revenue += metrics.revenue.unwrap_or(0.0);
    }
    if table.reports_revenue {
        totals.revenue = Some(revenue);
        totals.overall_margin_pct = margin_pct(totals.scenario_profit, revenue);
    }
    totals
}

/// `profit / revenue * 100`, undefined for zero revenue.
pub fn margin_pct(profit: f64, revenue: f64) -> Option<f64> {
    (revenue != 0.0).then(|| profit / revenue * 100.0)
}

/// Drugs grouped by name, ranked by summed scenario profit under `basis`.
///
/// Groups keep first-appearance order, and the sort is stable, so equal
/// totals rank in source order.
pub fn top_n_by_profit(table: &ExtendedTable, basis: ProfitBasis, n: usize) -> Vec<RankedDrug> {
    let mut groups: Vec<RankedDrug> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for row in &table.records {
        let profit = row.basis(basis).scenario_profit;
        match index.get(row.record.name.as_str()) {
            Some(&slot) => {
                let group = &mut groups[slot];
                group.total_profit += profit;
                group.rx_count += row.record.rx_count;
                group.record_count += 1;
            }
            None => {
                index.insert(&row.record.name, groups.len());
                groups.push(RankedDrug {
                    rank: 0,
                    name: row.record.name.clone(),
                    total_profit: profit,
                    rx_count: row.record.rx_count,
                    record_count: 1,
                });
            }
        }
    }

    groups.sort_by(|a, b| b.total_profit.total_cmp(&a.total_profit));
    groups.truncate(n);
    for (idx, group) in groups.iter_mut().enumerate() {
        group.rank = idx + 1;
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proforma_model::{DrugRecord, Scenario};
    use proforma_transform::compute_metrics;

    fn row(name: &str, asp: f64, awp: f64) -> DrugRecord {
        DrugRecord {
            name: name.to_string(),
            dose_mg: Some(1.0),
            rx_count: 1.0,
            asp_profit_per_unit: asp,
            awp_profit_per_unit: awp,
            ..DrugRecord::default()
        }
    }

    fn table(rows: &[DrugRecord]) -> ExtendedTable {
        let config = ScenarioConfig::new().with_courier_cost(0.0);
        compute_metrics(rows, &config).unwrap()
    }

    #[test]
    fn ranking_orders_by_total_profit() {
        let rows = [
            row("A", 0.0, 100.0),
            row("B", 0.0, 50.0),
            row("C", 0.0, 200.0),
            row("D", 0.0, 75.0),
            row("E", 0.0, 10.0),
        ];
        let ranked = top_n_by_profit(&table(&rows), ProfitBasis::Awp, 5);
        let totals: Vec<f64> = ranked.iter().map(|drug| drug.total_profit).collect();

        assert_eq!(totals, vec![200.0, 100.0, 75.0, 50.0, 10.0]);
        assert_eq!(ranked[0].name, "C");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[4].rank, 5);
    }

    #[test]
    fn ranking_groups_names_and_keeps_ties_in_order() {
        let rows = [
            row("A", 0.0, 10.0),
            row("B", 0.0, 30.0),
            row("A", 0.0, 20.0),
            row("C", 0.0, 1.0),
        ];
        let ranked = top_n_by_profit(&table(&rows), ProfitBasis::Awp, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "A");
        assert_eq!(ranked[0].record_count, 2);
        assert_eq!(ranked[1].name, "B");
    }

    #[test]
    fn interleaved_names_group_and_equal_totals_keep_first_appearance() {
        let rows = [
            row("B", 0.0, 5.0),
            row("A", 0.0, 10.0),
            row("B", 0.0, 5.0),
            row("C", 0.0, 10.0),
            row("A", 0.0, -5.0),
            row("D", 0.0, 1.0),
        ];
        let ranked = top_n_by_profit(&table(&rows), ProfitBasis::Awp, 10);
        let names: Vec<&str> = ranked.iter().map(|drug| drug.name.as_str()).collect();

        assert_eq!(names, vec!["B", "C", "A", "D"]);
        assert_eq!(ranked[0].total_profit, 10.0);
        assert_eq!(ranked[0].record_count, 2);
        assert_eq!(ranked[2].total_profit, 5.0);
        assert_eq!(ranked[2].record_count, 2);
    }

    #[test]
    fn margin_undefined_without_revenue() {
        assert_eq!(margin_pct(10.0, 0.0), None);
        assert_eq!(margin_pct(10.0, 40.0), Some(25.0));
    }

    #[test]
    fn summary_without_purchase_price_has_no_revenue() {
        let summary = summarize(&table(&[row("A", 1.0, 2.0)]), &ScenarioConfig::new());

        assert_eq!(summary.asp.revenue, None);
        assert_eq!(summary.asp.overall_margin_pct, None);
        assert_eq!(summary.costs.cogs, None);
        assert_eq!(summary.record_count, 1);
    }

    #[test]
    fn staffing_totals_match_configured_cost() {
        let config = ScenarioConfig::new()
            .with_courier_cost(0.0)
            .with_scenario(Scenario::SelfStaffed)
            .with_staffing(Some(300.0), Some(300.0), None, None);
        let rows = [row("A", 1.0, 1.0), row("B", 1.0, 1.0), row("C", 1.0, 1.0)];
        let extended = compute_metrics(&rows, &config).unwrap();
        let summary = summarize(&extended, &config);

        assert!((summary.costs.staffing - 600.0).abs() < 1e-9);
        assert!((summary.asp.scenario_profit - (3.0 - 600.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_table_summarizes_to_zero() {
        let summary = summarize(&ExtendedTable::default(), &ScenarioConfig::new());

        assert!(summary.is_empty());
        assert_eq!(summary.asp.net_profit, 0.0);
        assert!(summary.top_drugs.is_empty());
    }
}
