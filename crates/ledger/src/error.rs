//! Ledger errors

use estateflow_core::RequestStatus;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from strict ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Request not found: {0}")]
    NotFound(String),

    #[error("Illegal status transition for {id}: {from} -> {to}")]
    IllegalTransition {
        id: String,
        from: RequestStatus,
        to: RequestStatus,
    },
}

/// Caller input rejected before it reaches the ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Loan amount must be positive, got {0}")]
    NonPositiveLoanAmount(Decimal),

    #[error("Interest rate cannot be negative, got {0}")]
    NegativeRate(Decimal),

    #[error("Loan term must be at least one month")]
    ZeroTerm,

    #[error("Unknown collateral type: {0}")]
    UnknownCollateral(String),
}
