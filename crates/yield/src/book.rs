//! Release sessions for every managed loan

use std::collections::HashMap;

use estateflow_core::Amount;

use crate::error::YieldError;
use crate::session::LoanSession;
use crate::snapshot::{ReleaseOutcome, YieldSnapshot};

/// Yield sessions indexed by loan request id.
///
/// Each loan has exactly one session, so a release always reads and writes
/// the same snapshot.
#[derive(Debug, Default)]
pub struct YieldBook {
    sessions: HashMap<String, LoanSession>,
}

impl YieldBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for `loan_id`
    pub fn open_session(
        &mut self,
        loan_id: &str,
        principal: Amount,
        yield_available: Amount,
        released: Amount,
    ) -> Result<&LoanSession, YieldError> {
        if self.sessions.contains_key(loan_id) {
            return Err(YieldError::SessionExists(loan_id.to_string()));
        }

        let session = LoanSession::open(loan_id, principal, yield_available, released)?;
        tracing::info!(
            loan_id,
            principal = %principal,
            yield_available = %yield_available,
            released = %released,
            "Yield session opened"
        );

        Ok(self.sessions.entry(loan_id.to_string()).or_insert(session))
    }

    pub fn has_session(&self, loan_id: &str) -> bool {
        self.sessions.contains_key(loan_id)
    }

    pub fn session(&self, loan_id: &str) -> Option<&LoanSession> {
        self.sessions.get(loan_id)
    }

    pub fn snapshot(&self, loan_id: &str) -> Option<YieldSnapshot> {
        self.sessions.get(loan_id).map(LoanSession::snapshot)
    }

    fn session_mut(&mut self, loan_id: &str) -> Result<&mut LoanSession, YieldError> {
        self.sessions
            .get_mut(loan_id)
            .ok_or_else(|| YieldError::SessionNotFound(loan_id.to_string()))
    }

    /// Release yield for `loan_id` and store the result
    pub fn release(&mut self, loan_id: &str) -> Result<ReleaseOutcome, YieldError> {
        Ok(self.session_mut(loan_id)?.release())
    }

    /// Credit collected yield to `loan_id`
    pub fn accrue(&mut self, loan_id: &str, amount: Amount) -> Result<YieldSnapshot, YieldError> {
        Ok(self.session_mut(loan_id)?.accrue(amount))
    }

    /// Drop the session for `loan_id`, returning it if present
    pub fn close_session(&mut self, loan_id: &str) -> Option<LoanSession> {
        let closed = self.sessions.remove(loan_id);
        if closed.is_some() {
            tracing::info!(loan_id, "Yield session closed");
        }
        closed
    }

    /// Loan ids with an open session, sorted
    pub fn loan_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.sessions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
