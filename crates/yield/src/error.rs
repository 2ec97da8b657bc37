//! Yield engine errors

use estateflow_core::Amount;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum YieldError {
    #[error("No yield session for loan: {0}")]
    SessionNotFound(String),

    #[error("Yield session already open for loan: {0}")]
    SessionExists(String),

    #[error("Released {released} exceeds principal {principal}")]
    ReleasedExceedsPrincipal { released: Amount, principal: Amount },
}
