//! EstateFlow Yield Release Engine
//!
//! Releases property yield against an outstanding loan balance.
//!
//! [`release`] is the pure rule: it moves `min(yield_available,
//! loan_remaining)` from the yield pool into `released` and out of
//! `loan_remaining`, so `released + loan_remaining` never changes.
//! [`LoanSession`] holds one loan's snapshot and fixed principal and
//! [`YieldBook`] keeps the sessions of a console keyed by request id.

mod book;
mod error;
mod session;
mod snapshot;

pub use book::YieldBook;
pub use error::YieldError;
pub use session::{LoanSession, ReleaseRecord};
pub use snapshot::{release, ReleaseOutcome, YieldSnapshot};
