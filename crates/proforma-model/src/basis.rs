use std::fmt;

use serde::{Deserialize, Serialize};

/// Reimbursement basis a profit figure is quoted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitBasis {
    /// Average Sales Price.
    Asp,
    /// Average Wholesale Price.
    Awp,
}

impl ProfitBasis {
    pub const ALL: [ProfitBasis; 2] = [ProfitBasis::Asp, ProfitBasis::Awp];

    pub fn label(self) -> &'static str {
        match self {
            ProfitBasis::Asp => "ASP",
            ProfitBasis::Awp => "AWP",
        }
    }
}

impl fmt::Display for ProfitBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
