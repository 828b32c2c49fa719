//! Summary totals, snapshot shape and written outputs.

use std::fs;

use proforma_model::{DrugRecord, ProfitBasis, ScenarioConfig};
use proforma_report::{
    EXTENDED_CSV, SUMMARY_JSON, summarize, top_n_by_profit, write_extended_csv,
    write_summary_json,
};
use proforma_transform::compute_metrics;
use proptest::prelude::*;
use tempfile::TempDir;

fn record(name: &str, dose: f64, rx: f64, asp: f64, awp: f64, price: f64) -> DrugRecord {
    DrugRecord {
        name: name.to_string(),
        strength_text: format!("{dose} MG"),
        dose_mg: Some(dose),
        rx_count: rx,
        purchase_price_per_unit: Some(price),
        asp_profit_per_unit: asp,
        awp_profit_per_unit: awp,
        ..DrugRecord::default()
    }
}

fn sample_records() -> Vec<DrugRecord> {
    vec![
        record("ALPHA", 100.0, 10.0, 2.0, 1.0, 0.5),
        record("BETA", 10.0, 4.0, -1.0, 3.0, 2.0),
        record("ALPHA", 50.0, 2.0, 1.5, 0.25, 0.5),
    ]
}

fn sample_config() -> ScenarioConfig {
    ScenarioConfig::new()
        .with_courier_cost(8.0)
        .with_misc_cost(2.0)
        .with_revenue_share(0.25)
}

#[test]
fn summary_json_shape() {
    let config = sample_config();
    let table = compute_metrics(&sample_records(), &config).unwrap();
    let summary = summarize(&table, &config);
    let json = serde_json::to_string_pretty(&summary).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "scenario": "managed",
      "share_basis": "both",
      "revenue_share_fraction": 0.25,
      "input_count": 3,
      "record_count": 3,
      "filtered_out": 0,
      "missing_dose_excluded": 0,
      "total_rx": 16.0,
      "costs": {
        "courier": 128.0,
        "misc": 32.0,
        "variable": 160.0,
        "staffing": 0.0,
        "cogs": 630.0
      },
      "asp": {
        "total_dispense_value": 2110.0,
        "revenue": 2740.0,
        "scenario_profit": 1950.0,
        "revenue_share_amount": 487.5,
        "net_profit": 1462.5,
        "overall_margin_pct": 71.16788321167883
      },
      "awp": {
        "total_dispense_value": 1145.0,
        "revenue": 1775.0,
        "scenario_profit": 985.0,
        "revenue_share_amount": 246.25,
        "net_profit": 738.75,
        "overall_margin_pct": 55.49295774647888
      },
      "ranking_basis": "awp",
      "top_drugs": [
        {
          "rank": 1,
          "name": "ALPHA",
          "total_profit": 905.0,
          "rx_count": 12.0,
          "record_count": 2
        },
        {
          "rank": 2,
          "name": "BETA",
          "total_profit": 80.0,
          "rx_count": 4.0,
          "record_count": 1
        }
      ]
    }
    "#);
}

#[test]
fn ranking_follows_configured_basis() {
    let config = sample_config();
    let table = compute_metrics(&sample_records(), &config).unwrap();

    let by_asp = top_n_by_profit(&table, ProfitBasis::Asp, 5);
    assert_eq!(by_asp[0].name, "ALPHA");
    assert_eq!(by_asp[1].total_profit, -80.0);
}

#[test]
fn writes_csv_and_json_outputs() {
    let dir = TempDir::new().unwrap();
    let config = sample_config();
    let table = compute_metrics(&sample_records(), &config).unwrap();
    let summary = summarize(&table, &config);

    let csv_path = write_extended_csv(dir.path(), &table).unwrap();
    let json_path = write_summary_json(dir.path(), &summary).unwrap();

    assert_eq!(csv_path, dir.path().join(EXTENDED_CSV));
    assert_eq!(json_path, dir.path().join(SUMMARY_JSON));

    let csv = fs::read_to_string(&csv_path).unwrap();
    let header = csv.lines().next().unwrap();
    assert!(header.starts_with("Drug Name,HCPCS,NDC,Strength,Dose_MG"));
    assert!(header.contains("Total COGS"));
    assert!(header.ends_with("AWP Net Profit"));
    assert_eq!(csv.lines().count(), 4);

    let parsed: proforma_model::Summary =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed, summary);
}

fn arb_priced_record() -> impl Strategy<Value = DrugRecord> {
    (
        0.0f64..1000.0,
        0.0f64..200.0,
        -20.0f64..20.0,
        -20.0f64..20.0,
        0.0f64..50.0,
    )
        .prop_map(|(dose, rx, asp, awp, price)| record("X", dose, rx.floor(), asp, awp, price))
}

proptest! {
    #[test]
    fn dispense_total_equals_revenue_minus_cogs(
        records in prop::collection::vec(arb_priced_record(), 1..30),
    ) {
        let config = ScenarioConfig::default();
        let table = compute_metrics(&records, &config).unwrap();
        let summary = summarize(&table, &config);
        let cogs = summary.costs.cogs.unwrap();

        for basis in ProfitBasis::ALL {
            let totals = summary.basis(basis);
            let revenue = totals.revenue.unwrap();
            let scale = revenue.abs().max(cogs.abs()).max(1.0);
            prop_assert!(
                (totals.total_dispense_value - (revenue - cogs)).abs() <= 1e-6 * scale
            );
        }
    }

    #[test]
    fn partner_and_dispenser_shares_add_up(
        records in prop::collection::vec(arb_priced_record(), 0..30),
        fraction in 0.0f64..=1.0,
    ) {
        let config = ScenarioConfig::new().with_revenue_share(fraction);
        let table = compute_metrics(&records, &config).unwrap();
        let summary = summarize(&table, &config);

        for basis in ProfitBasis::ALL {
            let totals = summary.basis(basis);
            let rebuilt = totals.revenue_share_amount + totals.net_profit;
            prop_assert!(
                (rebuilt - totals.scenario_profit).abs() <= 1e-6 * totals.scenario_profit.abs().max(1.0)
            );
        }
    }
}
