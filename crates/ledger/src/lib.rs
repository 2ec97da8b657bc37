//! EstateFlow Request Ledger
//!
//! Owns the in-process collection of loan requests. Requests are created
//! with ledger-assigned identity and lifecycle fields, patched in place and
//! deleted; ids are never reused within one ledger.
//!
//! Mutations through [`RequestLedger::update_request`] and
//! [`RequestLedger::delete_request`] silently ignore unknown ids.
//! [`RequestLedger::transition_status`] is the strict path: it validates the
//! lifecycle table and reports missing ids.

pub mod error;
pub mod id;
pub mod request;
pub mod seed;
pub mod store;
pub mod validation;

pub use error::{LedgerError, ValidationError};
pub use id::RequestIdGenerator;
pub use request::{LoanRequest, NewLoanRequest, RequestId, RequestPatch};
pub use store::{RequestLedger, StatusCounts};
pub use validation::{validate_new_request, FormDefaults, RequestForm};
