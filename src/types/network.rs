//! Networks supported by the Angor protocol
//!
//! Each network has one publicly known extended public key from which every
//! project identifier on that network is derived.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Angor root extended public keys, one per network
pub mod constants {
    /// Mainnet Angor root key
    pub const BITCOIN_ROOT_KEY: &str = "xpub661MyMwAqRbcGNxKe9aFkPisf3h32gHLJm8f9XAqx8FB1Nk6KngCY8hkhGqxFr2Gyb6yfUaQVbodxLoC1f3K5HU9LM1CXE59gkEXSGCCZ1B";

    /// Testnet Angor root key
    pub const TESTNET_ROOT_KEY: &str = "tpubD8JfN1evVWPoJmLgVg6Usq2HEW9tLqm6CyECAADnH5tyQosrL6NuhpL9X1cQCbSmndVrgLSGGdbRqLfUbE6cRqUbrHtDJgSyQEY2Uu7WwTL";
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AngorNetwork {
    Bitcoin,
    Testnet,
}

impl AngorNetwork {
    /// Angor root extended public key for this network
    pub fn root_key(&self) -> &'static str {
        match self {
            Self::Bitcoin => constants::BITCOIN_ROOT_KEY,
            Self::Testnet => constants::TESTNET_ROOT_KEY,
        }
    }

    /// Network used when rendering fee output addresses
    pub fn bitcoin_network(&self) -> bitcoin::Network {
        match self {
            Self::Bitcoin => bitcoin::Network::Bitcoin,
            Self::Testnet => bitcoin::Network::Testnet,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bitcoin => "bitcoin",
            Self::Testnet => "testnet",
        }
    }
}

impl FromStr for AngorNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bitcoin" | "mainnet" => Ok(Self::Bitcoin),
            "testnet" => Ok(Self::Testnet),
            other => Err(format!("Unsupported Angor network: {}", other)),
        }
    }
}

impl std::fmt::Display for AngorNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
