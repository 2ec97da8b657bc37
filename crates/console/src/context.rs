//! Application context - wires the ledger and the yield book together

use estateflow_core::{Amount, RequestStatus};
use estateflow_ledger::{
    LedgerError, LoanRequest, RequestForm, RequestLedger, RequestPatch, ValidationError,
};
use chrono::{DateTime, Utc};
use estateflow_yield::{
    LoanSession, ReleaseOutcome, ReleaseRecord, YieldBook, YieldError, YieldSnapshot,
};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::config::ConsoleConfig;

/// Shown when a managed loan id has no request in the ledger
pub const UNKNOWN_PROPERTY: &str = "Unknown Property";

/// Errors surfaced by console operations
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Yield error: {0}")]
    Yield(#[from] YieldError),
}

/// What the management console shows for one loan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsoleView {
    pub loan_id: String,
    pub property: String,
    pub status: Option<RequestStatus>,
    pub principal: Amount,
    pub snapshot: YieldSnapshot,
    pub progress_percent: Decimal,
    pub can_release: bool,
    pub opened_at: DateTime<Utc>,
    /// Paybacks made through this console, oldest first
    pub releases: Vec<ReleaseRecord>,
}

/// One browsing session: its own ledger and its own yield sessions
pub struct AppContext {
    pub ledger: RequestLedger,
    pub yields: YieldBook,
    config: ConsoleConfig,
    session_id: Uuid,
}

impl AppContext {
    pub fn new(config: ConsoleConfig) -> Self {
        let ledger = if config.seed_requests {
            RequestLedger::with_seed()
        } else {
            RequestLedger::new()
        };
        let session_id = Uuid::new_v4();

        tracing::info!(
            %session_id,
            requests = ledger.len(),
            "Console session started"
        );

        Self {
            ledger,
            yields: YieldBook::new(),
            config,
            session_id,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Validate a form and add the resulting request
    pub fn submit_request(&mut self, form: RequestForm) -> Result<LoanRequest, ConsoleError> {
        let image = self.random_property_image();
        let data = form.into_new_request(&self.config.form_defaults(), image)?;
        let created = self.ledger.add_request(data).clone();

        tracing::info!(
            session_id = %self.session_id,
            id = %created.id,
            property = %created.property,
            "Request submitted"
        );
        Ok(created)
    }

    fn random_property_image(&self) -> String {
        let count = self.config.property_image_count.max(1);
        let n = rand::thread_rng().gen_range(1..=count);
        format!("/properties/{n}.png")
    }

    /// Shallow-merge a patch; false when the id is unknown
    pub fn update_request(&mut self, id: &str, patch: RequestPatch) -> bool {
        self.ledger.update_request(id, patch)
    }

    pub fn transition(&mut self, id: &str, next: RequestStatus) -> Result<LoanRequest, ConsoleError> {
        Ok(self.ledger.transition_status(id, next)?.clone())
    }

    /// Delete a request and drop its yield session
    pub fn delete_request(&mut self, id: &str) -> Option<LoanRequest> {
        let removed = self.ledger.delete_request(id);
        if removed.is_some() {
            self.yields.close_session(id);
        }
        removed
    }

    /// Open a yield session with explicit starting values
    pub fn open_session(
        &mut self,
        id: &str,
        principal: Amount,
        yield_available: Amount,
        released: Amount,
    ) -> Result<&LoanSession, ConsoleError> {
        Ok(self
            .yields
            .open_session(id, principal, yield_available, released)?)
    }

    /// Session for `id`, opened from config defaults on first use.
    ///
    /// The principal is the request's loan amount, with the configured
    /// `released` capped at it. Ids the ledger does not hold use the
    /// configured fallback principal and `released` as given.
    pub fn ensure_session(&mut self, id: &str) -> Result<&LoanSession, ConsoleError> {
        if !self.yields.has_session(id) {
            let defaults = &self.config.managed_loan;
            let (principal, released) = match self.ledger.get(id) {
                Some(request) => (request.loan_amount, defaults.released.min(request.loan_amount)),
                None => (defaults.fallback_principal, defaults.released),
            };
            let yield_available = defaults.yield_available;
            self.yields
                .open_session(id, principal, yield_available, released)?;
        }

        self.yields
            .session(id)
            .ok_or_else(|| ConsoleError::Yield(YieldError::SessionNotFound(id.to_string())))
    }

    /// Management console data for one loan
    pub fn console_view(&mut self, id: &str) -> Result<ConsoleView, ConsoleError> {
        let (principal, snapshot, progress_percent, can_release, opened_at, releases) = {
            let session = self.ensure_session(id)?;
            (
                session.principal(),
                session.snapshot(),
                session.progress_percent(),
                session.can_release(),
                session.opened_at(),
                session.releases().to_vec(),
            )
        };

        let request = self.ledger.get(id);
        Ok(ConsoleView {
            loan_id: id.to_string(),
            property: request
                .map(|r| r.property.clone())
                .unwrap_or_else(|| UNKNOWN_PROPERTY.to_string()),
            status: request.map(|r| r.status),
            principal,
            snapshot,
            progress_percent,
            can_release,
            opened_at,
            releases,
        })
    }

    /// Release yield for one loan to the nominee purchaser
    pub fn release_yield(&mut self, id: &str) -> Result<ReleaseOutcome, ConsoleError> {
        self.ensure_session(id)?;
        let outcome = self.yields.release(id)?;
        tracing::debug!(session_id = %self.session_id, loan_id = id, "Release handled");
        Ok(outcome)
    }

    /// Credit collected property yield to one loan
    pub fn accrue_yield(&mut self, id: &str, amount: Amount) -> Result<YieldSnapshot, ConsoleError> {
        self.ensure_session(id)?;
        Ok(self.yields.accrue(id, amount)?)
    }
}
