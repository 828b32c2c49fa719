use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info;

use proforma_cli::config::{column_schema, load_config_file};
use proforma_cli::pipeline::{AnalysisRequest, run_analysis};
use proforma_cli::types::AnalysisResult;
use proforma_model::{
    DEFAULT_ASP_MULTIPLIER, DEFAULT_AWP_MULTIPLIER, DoseNormalization, Field, FilterStage,
    MissingDosePolicy, ProfitBasis, ProfitSource, Scenario, ScenarioConfig, ShareBasis,
};
use proforma_report::{HypotheticalInput, HypotheticalResult, hypothetical};

use crate::cli::{
    AnalyzeArgs, BasisArg, DoseNormalizationArg, FilterStageArg, HypotheticalArgs,
    MissingDoseArg, ProfitSourceArg, ScenarioArg, ShareBasisArg,
};
use crate::summary::apply_table_style;

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalysisResult> {
    let config = scenario_config(args)?;
    config.validate().context("invalid scenario")?;
    let schema = column_schema(&args.columns)?;
    let output_dir = if args.dry_run {
        None
    } else {
        Some(args.output_dir.clone().unwrap_or_else(|| {
            args.sheet
                .parent()
                .map(|parent| parent.join("output"))
                .unwrap_or_else(|| "output".into())
        }))
    };
    info!(sheet = %args.sheet.display(), dry_run = args.dry_run, "analysis requested");
    run_analysis(&AnalysisRequest {
        source: args.sheet.clone(),
        schema,
        config,
        output_dir,
    })
}

pub fn run_hypothetical(args: &HypotheticalArgs) -> Result<HypotheticalResult> {
    let input = HypotheticalInput::from_parts(args.revenue, args.profit, args.margin)?;
    Ok(hypothetical(input)?)
}

pub fn run_columns() {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Header", "Also accepted", "Required"]);
    apply_table_style(&mut table);
    for field in Field::ALL {
        table.add_row(vec![
            field.key().to_string(),
            field.canonical_header().to_string(),
            field.aliases().join(", "),
            required_when(field).to_string(),
        ]);
    }
    println!("{table}");
}

fn required_when(field: Field) -> &'static str {
    match field {
        Field::Name | Field::Strength | Field::RxCount => "always",
        Field::UnitOfMeasure => "per-uom dose normalization",
        Field::AspProfit | Field::AwpProfit => "sheet profits",
        Field::PurchasePrice => "derived profits",
        Field::Ndc | Field::Hcpcs => "no",
    }
}

/// Scenario file values (or defaults), overridden by any flags given.
fn scenario_config(args: &AnalyzeArgs) -> Result<ScenarioConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => ScenarioConfig::default(),
    };
    if let Some(value) = args.courier_cost {
        config.courier_cost_per_rx = value;
    }
    if let Some(value) = args.misc_cost {
        config.misc_cost_per_rx = value;
    }
    if let Some(value) = args.share {
        config.revenue_share_fraction = value;
    }
    if let Some(scenario) = args.scenario {
        config.scenario = match scenario {
            ScenarioArg::Managed => Scenario::Managed,
            ScenarioArg::SelfStaffed => Scenario::SelfStaffed,
        };
    }
    if args.pharmacist_cost.is_some() {
        config.pharmacist_cost_total = args.pharmacist_cost;
    }
    if args.technician_cost.is_some() {
        config.technician_cost_total = args.technician_cost;
    }
    if args.emr_cost.is_some() {
        config.emr_cost_total = args.emr_cost;
    }
    if args.psao_cost.is_some() {
        config.psao_cost_total = args.psao_cost;
    }
    if args.profitable_only {
        config.profitable_only = true;
    }
    if let Some(stage) = args.filter_stage {
        config.filter_stage = match stage {
            FilterStageArg::BeforeCosts => FilterStage::BeforeCosts,
            FilterStageArg::AfterCosts => FilterStage::AfterCosts,
        };
    }
    if let Some(normalization) = args.dose_normalization {
        config.dose_normalization = match normalization {
            DoseNormalizationArg::Flat => DoseNormalization::Flat,
            DoseNormalizationArg::PerUom => DoseNormalization::PerUnitOfMeasure,
        };
    }
    config.profit_source = profit_source(args, config.profit_source);
    if let Some(basis) = args.share_basis {
        config.share_basis = match basis {
            ShareBasisArg::Asp => ShareBasis::Asp,
            ShareBasisArg::Awp => ShareBasis::Awp,
            ShareBasisArg::Both => ShareBasis::Both,
        };
    }
    if let Some(policy) = args.missing_dose {
        config.missing_dose = match policy {
            MissingDoseArg::Zero => MissingDosePolicy::Zero,
            MissingDoseArg::Exclude => MissingDosePolicy::Exclude,
        };
    }
    if let Some(basis) = args.rank_by {
        config.ranking_basis = match basis {
            BasisArg::Asp => ProfitBasis::Asp,
            BasisArg::Awp => ProfitBasis::Awp,
        };
    }
    if let Some(n) = args.top {
        config.top_n = n;
    }
    Ok(config)
}

/// Giving either multiplier implies derived profits.
fn profit_source(args: &AnalyzeArgs, current: ProfitSource) -> ProfitSource {
    let multipliers_given = args.asp_multiplier.is_some() || args.awp_multiplier.is_some();
    let derived = match args.profit_source {
        Some(ProfitSourceArg::Sheet) => false,
        Some(ProfitSourceArg::Derived) => true,
        None => current.is_derived() || multipliers_given,
    };
    if !derived {
        return ProfitSource::Sheet;
    }
    let (asp, awp) = match current {
        ProfitSource::Derived {
            asp_multiplier,
            awp_multiplier,
        } => (asp_multiplier, awp_multiplier),
        ProfitSource::Sheet => (DEFAULT_ASP_MULTIPLIER, DEFAULT_AWP_MULTIPLIER),
    };
    ProfitSource::Derived {
        asp_multiplier: args.asp_multiplier.unwrap_or(asp),
        awp_multiplier: args.awp_multiplier.unwrap_or(awp),
    }
}
