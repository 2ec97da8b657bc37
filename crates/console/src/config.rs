//! Console configuration
//!
//! Every field has a default, so a config file only needs the values it
//! overrides.

use std::path::Path;

use estateflow_core::Amount;
use estateflow_ledger::FormDefaults;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for the management console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Interest rate assigned to requests created from the form
    #[serde(default = "default_rate")]
    pub default_rate: Decimal,

    /// Proofs required for requests created from the form
    #[serde(default = "default_total_proofs")]
    pub default_total_proofs: u32,

    /// New requests get `/properties/{1..=N}.png`
    #[serde(default = "default_property_image_count")]
    pub property_image_count: u32,

    /// Load the six-property fixture at start-up
    #[serde(default = "default_seed_requests")]
    pub seed_requests: bool,

    /// Starting state of a yield session opened on demand
    #[serde(default)]
    pub managed_loan: ManagedLoanDefaults,
}

/// Initial yield state for loans the console starts managing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedLoanDefaults {
    /// Principal for ids not present in the ledger. Known requests use
    /// their own loan amount.
    #[serde(default = "default_principal")]
    pub fallback_principal: Amount,

    #[serde(default = "default_yield_available")]
    pub yield_available: Amount,

    #[serde(default = "default_released")]
    pub released: Amount,
}

fn default_rate() -> Decimal {
    Decimal::new(60, 1) // 6.0%
}

fn default_total_proofs() -> u32 {
    6
}

fn default_property_image_count() -> u32 {
    6
}

fn default_seed_requests() -> bool {
    true
}

fn default_principal() -> Amount {
    Amount::from_dollars(150_000)
}

fn default_yield_available() -> Amount {
    Amount::from_dollars(3_200)
}

fn default_released() -> Amount {
    Amount::from_dollars(3_000)
}

impl Default for ManagedLoanDefaults {
    fn default() -> Self {
        Self {
            fallback_principal: default_principal(),
            yield_available: default_yield_available(),
            released: default_released(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            default_rate: default_rate(),
            default_total_proofs: default_total_proofs(),
            property_image_count: default_property_image_count(),
            seed_requests: default_seed_requests(),
            managed_loan: ManagedLoanDefaults::default(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn form_defaults(&self) -> FormDefaults {
        FormDefaults {
            rate: self.default_rate,
            total_proofs: self.default_total_proofs,
        }
    }
}
