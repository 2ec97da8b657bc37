//! Yield snapshot and the release rule

use estateflow_core::Amount;
use serde::{Deserialize, Serialize};

/// Financial state of one managed loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YieldSnapshot {
    /// Yield collected from the property and not yet released
    pub yield_available: Amount,
    /// Total paid out to the nominee purchaser so far
    pub released: Amount,
    /// Outstanding loan balance
    pub loan_remaining: Amount,
}

impl YieldSnapshot {
    pub fn new(yield_available: Amount, released: Amount, loan_remaining: Amount) -> Self {
        Self {
            yield_available,
            released,
            loan_remaining,
        }
    }

    /// `released + loan_remaining`; preserved by [`release`]
    pub fn ledger_balance(&self) -> Amount {
        self.released.saturating_add(&self.loan_remaining)
    }

    /// Whether a release would move any money
    pub fn can_release(&self) -> bool {
        !self.yield_available.is_zero() && !self.loan_remaining.is_zero()
    }

    pub fn is_repaid(&self) -> bool {
        self.loan_remaining.is_zero()
    }
}

/// Result of one release action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseOutcome {
    /// Amount moved; zero when nothing could be released
    pub transfer: Amount,
    pub before: YieldSnapshot,
    pub after: YieldSnapshot,
}

/// Release available yield against the outstanding balance.
///
/// ```text
/// transfer        = min(yield_available, loan_remaining)
/// released'       = released + transfer
/// yield_available'= yield_available - transfer
/// loan_remaining' = loan_remaining - transfer
/// ```
///
/// Total and pure: the caller stores `after` wherever the snapshot lives.
pub fn release(snapshot: YieldSnapshot) -> ReleaseOutcome {
    let transfer = snapshot.yield_available.min(snapshot.loan_remaining);

    // transfer <= both operands, so the subtractions cannot floor
    let after = YieldSnapshot {
        yield_available: snapshot.yield_available.saturating_sub(&transfer),
        released: snapshot.released.saturating_add(&transfer),
        loan_remaining: snapshot.loan_remaining.saturating_sub(&transfer),
    };

    ReleaseOutcome {
        transfer,
        before: snapshot,
        after,
    }
}
