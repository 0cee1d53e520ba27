use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Externally supplied status tag of a project creation or investment transaction
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    NotIdentified,
    Pending,
    Confirmed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotIdentified => "not_identified",
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
        }
    }

    /// Status of a transaction as reported by the chain source
    pub fn from_confirmation(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Pending
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_identified" => Ok(Self::NotIdentified),
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            other => Err(format!("Unknown transaction status: {}", other)),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
