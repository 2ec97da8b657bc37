//! Collateral classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown collateral type: {0}")]
pub struct UnknownCollateral(pub String);

/// What secures a loan request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollateralType {
    /// Repaid from the property's yield stream
    Yield,
    /// Secured directly by the property
    Direct,
}

impl CollateralType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollateralType::Yield => "yield",
            CollateralType::Direct => "direct",
        }
    }
}

impl fmt::Display for CollateralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollateralType {
    type Err = UnknownCollateral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yield" => Ok(CollateralType::Yield),
            "direct" => Ok(CollateralType::Direct),
            _ => Err(UnknownCollateral(s.to_string())),
        }
    }
}
