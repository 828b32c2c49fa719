//! Tests for proforma-model types.

use proforma_model::{
    ColumnSchema, DrugRecord, Field, ProfitBasis, ProfitSource, Scenario, ScenarioConfig,
    ShareBasis,
};

#[test]
fn config_round_trips_through_json() {
    let config = ScenarioConfig::new()
        .with_courier_cost(6.5)
        .with_scenario(Scenario::SelfStaffed)
        .with_profit_source(ProfitSource::derived())
        .with_share_basis(ShareBasis::Awp);
    let json = serde_json::to_string(&config).expect("serialize config");
    let round: ScenarioConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(round, config);
}

#[test]
fn partial_config_fills_defaults() {
    let json = r#"{ "courier_cost_per_rx": 5.0, "scenario": "self_staffed",
                    "profit_source": { "kind": "derived", "asp_multiplier": 1.1, "awp_multiplier": 0.9 } }"#;
    let config: ScenarioConfig = serde_json::from_str(json).expect("deserialize config");
    assert_eq!(config.courier_cost_per_rx, 5.0);
    assert_eq!(config.scenario, Scenario::SelfStaffed);
    assert_eq!(config.revenue_share_fraction, 0.20);
    assert_eq!(config.top_n, 5);
    assert_eq!(
        config.profit_source,
        ProfitSource::Derived {
            asp_multiplier: 1.1,
            awp_multiplier: 0.9
        }
    );
}

#[test]
fn default_record_has_unit_floor() {
    let record = DrugRecord::default();
    assert_eq!(record.unit_of_measure_code, 1.0);
    assert_eq!(record.rx_count, 0.0);
    assert!(!record.is_profitable_per_unit());
}

#[test]
fn profitable_when_either_basis_positive() {
    let record = DrugRecord {
        asp_profit_per_unit: -1.0,
        awp_profit_per_unit: 0.01,
        ..DrugRecord::default()
    };
    assert!(record.is_profitable_per_unit());
    assert_eq!(record.profit_per_unit(ProfitBasis::Asp), -1.0);
}

#[test]
fn schema_serializes_overrides_by_field_key() {
    let schema = ColumnSchema::new().with_override(Field::RxCount, "Fills");
    let json = serde_json::to_string(&schema).expect("serialize schema");
    assert_eq!(json, r#"{"overrides":{"rx_count":"Fills"}}"#);
}
