pub mod basis;
pub mod error;
pub mod lookup;
pub mod metrics;
pub mod options;
pub mod record;
pub mod schema;
pub mod summary;

pub use basis::ProfitBasis;
pub use error::{ModelError, Result};
pub use lookup::{HeaderLookup, header_key};
pub use metrics::{BasisMetrics, ExtendedRecord, ExtendedTable};
pub use options::{
    DEFAULT_ASP_MULTIPLIER, DEFAULT_AWP_MULTIPLIER, DEFAULT_COURIER_COST_PER_RX,
    DEFAULT_REVENUE_SHARE_FRACTION, DEFAULT_TOP_N, DoseNormalization, FilterStage,
    MissingDosePolicy, ProfitSource, Scenario, ScenarioConfig, ShareBasis,
};
pub use record::DrugRecord;
pub use schema::{ColumnSchema, Field};
pub use summary::{BasisTotals, CostTotals, RankedDrug, Summary};
