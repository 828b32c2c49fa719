//! Spreadsheet column contract.
//!
//! Each logical [`Field`] has one canonical header (the name used by the
//! "Drug-Profitability" sheet) and a short list of aliases seen in older
//! exports. Callers may pin a field to an exact header with
//! [`ColumnSchema::with_override`], in which case aliases are not consulted.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::basis::ProfitBasis;
use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Ndc,
    Hcpcs,
    Strength,
    UnitOfMeasure,
    RxCount,
    PurchasePrice,
    AspProfit,
    AwpProfit,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Ndc,
        Field::Hcpcs,
        Field::Strength,
        Field::UnitOfMeasure,
        Field::RxCount,
        Field::PurchasePrice,
        Field::AspProfit,
        Field::AwpProfit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Ndc => "ndc",
            Field::Hcpcs => "hcpcs",
            Field::Strength => "strength",
            Field::UnitOfMeasure => "unit_of_measure",
            Field::RxCount => "rx_count",
            Field::PurchasePrice => "purchase_price",
            Field::AspProfit => "asp_profit",
            Field::AwpProfit => "awp_profit",
        }
    }

    pub fn canonical_header(self) -> &'static str {
        match self {
            Field::Name => "Drug Name",
            Field::Ndc => "NDC",
            Field::Hcpcs => "HCPCS",
            Field::Strength => "Strength",
            Field::UnitOfMeasure => "Unit of Measure",
            Field::RxCount => "Rx Count",
            Field::PurchasePrice => "Purchase Price",
            Field::AspProfit => "ASP Profit/Loss",
            Field::AwpProfit => "AWP Profit/Loss",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Name => &["Medication Name", "Medication", "Drug"],
            Field::Ndc => &["NDC Code", "NDC11"],
            Field::Hcpcs => &["HCPCS Code"],
            Field::Strength => &["Dose", "Dosage", "Strength/Dose"],
            Field::UnitOfMeasure => &["UOM", "Code Unit of Measure", "Package Size"],
            Field::RxCount => &["Rx Count (6M)", "Prescriptions", "Rx"],
            Field::PurchasePrice => &[
                "Purchase Price per Unit",
                "Unit Cost",
                "Acquisition Cost",
            ],
            Field::AspProfit => &["ASP Profit", "ASP Profit per Unit"],
            Field::AwpProfit => &["AWP Profit", "AWP Profit per Unit"],
        }
    }

    pub fn profit(basis: ProfitBasis) -> Field {
        match basis {
            ProfitBasis::Asp => Field::AspProfit,
            ProfitBasis::Awp => Field::AwpProfit,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Field::ALL
            .into_iter()
            .find(|field| field.key() == wanted)
            .ok_or_else(|| ModelError::UnknownField(value.to_string()))
    }
}

/// Header names accepted for each field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    #[serde(default)]
    overrides: BTreeMap<Field, String>,
}

impl ColumnSchema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_override(mut self, field: Field, header: impl Into<String>) -> Self {
        self.overrides.insert(field, header.into());
        self
    }

    pub fn override_for(&self, field: Field) -> Option<&str> {
        self.overrides.get(&field).map(String::as_str)
    }

    /// Headers to try for `field`, in priority order.
    pub fn candidates(&self, field: Field) -> Vec<&str> {
        if let Some(header) = self.override_for(field) {
            return vec![header];
        }
        let mut names = Vec::with_capacity(field.aliases().len() + 1);
        names.push(field.canonical_header());
        names.extend(field.aliases().iter().copied());
        names
    }
}
