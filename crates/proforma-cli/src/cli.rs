//! CLI argument definitions for the pro forma.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "proforma",
    version,
    about = "In-office dispensing pro forma - explore profit scenarios for a drug sheet",
    long_about = "Compute dispense value, costs, revenue share and net profit for every drug in \
                  a profitability sheet.\n\n\
                  Scenarios cover courier and miscellaneous costs per prescription, managed or \
                  self-staffed operation, and the partner revenue share."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow drug names to appear in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a profitability sheet under one scenario.
    Analyze(Box<AnalyzeArgs>),

    /// Derive revenue, profit or margin from the other two.
    Hypothetical(HypotheticalArgs),

    /// List the sheet columns the analysis understands.
    Columns,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the profitability sheet (CSV).
    #[arg(value_name = "CSV")]
    pub sheet: PathBuf,

    /// Scenario JSON file; flags given here override its values.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Courier cost per prescription.
    #[arg(long = "courier-cost", value_name = "AMOUNT")]
    pub courier_cost: Option<f64>,

    /// Miscellaneous cost per prescription.
    #[arg(long = "misc-cost", value_name = "AMOUNT")]
    pub misc_cost: Option<f64>,

    /// Revenue share fraction paid to the managing partner (0 to 1).
    #[arg(long = "share", value_name = "FRACTION")]
    pub share: Option<f64>,

    /// Operating model.
    #[arg(long = "scenario", value_enum)]
    pub scenario: Option<ScenarioArg>,

    /// Pharmacist cost for the period (self-staffed only).
    #[arg(long = "pharmacist-cost", value_name = "AMOUNT")]
    pub pharmacist_cost: Option<f64>,

    /// Technician cost for the period (self-staffed only).
    #[arg(long = "technician-cost", value_name = "AMOUNT")]
    pub technician_cost: Option<f64>,

    /// EMR cost for the period (self-staffed only).
    #[arg(long = "emr-cost", value_name = "AMOUNT")]
    pub emr_cost: Option<f64>,

    /// PSAO cost for the period (self-staffed only).
    #[arg(long = "psao-cost", value_name = "AMOUNT")]
    pub psao_cost: Option<f64>,

    /// Keep only drugs that are profitable on at least one basis.
    #[arg(long = "profitable-only")]
    pub profitable_only: bool,

    /// When the profitable-only filter is evaluated.
    #[arg(long = "filter-stage", value_enum)]
    pub filter_stage: Option<FilterStageArg>,

    /// How dose scales profit per unit to profit per prescription.
    #[arg(long = "dose-normalization", value_enum)]
    pub dose_normalization: Option<DoseNormalizationArg>,

    /// Where per-unit profits come from.
    #[arg(long = "profit-source", value_enum)]
    pub profit_source: Option<ProfitSourceArg>,

    /// ASP reimbursement multiplier for derived profits.
    #[arg(long = "asp-multiplier", value_name = "FACTOR")]
    pub asp_multiplier: Option<f64>,

    /// AWP reimbursement multiplier for derived profits.
    #[arg(long = "awp-multiplier", value_name = "FACTOR")]
    pub awp_multiplier: Option<f64>,

    /// Which basis the revenue share is taken from.
    #[arg(long = "share-basis", value_enum)]
    pub share_basis: Option<ShareBasisArg>,

    /// What to do with rows whose strength has no number.
    #[arg(long = "missing-dose", value_enum)]
    pub missing_dose: Option<MissingDoseArg>,

    /// Basis used for the profit ranking.
    #[arg(long = "rank-by", value_enum)]
    pub rank_by: Option<BasisArg>,

    /// Number of drugs in the profit ranking.
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Header override for a column, as FIELD=HEADER (repeatable).
    #[arg(long = "column", value_name = "FIELD=HEADER")]
    pub columns: Vec<String>,

    /// Output directory for generated files (default: <CSV dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Compute and print without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct HypotheticalArgs {
    /// Target revenue.
    #[arg(long = "revenue", value_name = "AMOUNT")]
    pub revenue: Option<f64>,

    /// Target profit.
    #[arg(long = "profit", value_name = "AMOUNT")]
    pub profit: Option<f64>,

    /// Target margin in percent.
    #[arg(long = "margin", value_name = "PERCENT")]
    pub margin: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScenarioArg {
    Managed,
    SelfStaffed,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FilterStageArg {
    BeforeCosts,
    AfterCosts,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DoseNormalizationArg {
    Flat,
    PerUom,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ProfitSourceArg {
    Sheet,
    Derived,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ShareBasisArg {
    Asp,
    Awp,
    Both,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MissingDoseArg {
    Zero,
    Exclude,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BasisArg {
    Asp,
    Awp,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
