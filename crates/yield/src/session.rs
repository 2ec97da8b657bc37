//! Per-loan release session

use chrono::{DateTime, Utc};
use estateflow_core::Amount;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::YieldError;
use crate::snapshot::{release, ReleaseOutcome, YieldSnapshot};

/// One completed release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub amount: Amount,
    pub released_at: DateTime<Utc>,
}

/// Yield state of a managed loan.
///
/// The principal is fixed when the session opens; progress is always
/// measured against it rather than re-derived from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSession {
    loan_id: String,
    principal: Amount,
    snapshot: YieldSnapshot,
    opened_at: DateTime<Utc>,
    releases: Vec<ReleaseRecord>,
}

impl LoanSession {
    /// Open a session with `released` already paid out of `principal`.
    ///
    /// The outstanding balance starts at `principal - released`.
    pub fn open(
        loan_id: impl Into<String>,
        principal: Amount,
        yield_available: Amount,
        released: Amount,
    ) -> Result<Self, YieldError> {
        let loan_remaining = principal
            .checked_sub(&released)
            .ok_or(YieldError::ReleasedExceedsPrincipal {
                released,
                principal,
            })?;

        Ok(Self {
            loan_id: loan_id.into(),
            principal,
            snapshot: YieldSnapshot::new(yield_available, released, loan_remaining),
            opened_at: Utc::now(),
            releases: Vec::new(),
        })
    }

    pub fn loan_id(&self) -> &str {
        &self.loan_id
    }

    pub fn principal(&self) -> Amount {
        self.principal
    }

    pub fn snapshot(&self) -> YieldSnapshot {
        self.snapshot
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Releases that moved money, oldest first
    pub fn releases(&self) -> &[ReleaseRecord] {
        &self.releases
    }

    pub fn can_release(&self) -> bool {
        self.snapshot.can_release()
    }

    /// Apply [`release`] and store the new snapshot
    pub fn release(&mut self) -> ReleaseOutcome {
        let outcome = release(self.snapshot);
        self.snapshot = outcome.after;

        if outcome.transfer.is_zero() {
            tracing::debug!(loan_id = %self.loan_id, "Nothing to release");
        } else {
            self.releases.push(ReleaseRecord {
                amount: outcome.transfer,
                released_at: Utc::now(),
            });
            tracing::info!(
                loan_id = %self.loan_id,
                transfer = %outcome.transfer,
                released = %outcome.after.released,
                loan_remaining = %outcome.after.loan_remaining,
                "Yield released"
            );
        }

        outcome
    }

    /// Credit newly collected property yield
    pub fn accrue(&mut self, amount: Amount) -> YieldSnapshot {
        self.snapshot.yield_available = self.snapshot.yield_available.saturating_add(&amount);
        tracing::debug!(
            loan_id = %self.loan_id,
            amount = %amount,
            yield_available = %self.snapshot.yield_available,
            "Yield accrued"
        );
        self.snapshot
    }

    /// `round(released / principal * 100)`, half away from zero.
    ///
    /// A zero principal reports 0.
    pub fn progress_percent(&self) -> Decimal {
        if self.principal.is_zero() {
            return Decimal::ZERO;
        }
        let ratio = self.snapshot.released.value() / self.principal.value();
        (ratio * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}
