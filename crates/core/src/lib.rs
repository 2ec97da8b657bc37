//! EstateFlow Core - Domain types
//!
//! Fundamental types shared by the request ledger and the yield engine:
//! - `Amount`: Non-negative dollar amount
//! - `RequestStatus`: Loan request lifecycle with its transition table
//! - `CollateralType`: What secures a loan

pub mod amount;
pub mod collateral;
pub mod status;

pub use amount::{Amount, AmountError};
pub use collateral::{CollateralType, UnknownCollateral};
pub use status::{RequestStatus, StatusError};
