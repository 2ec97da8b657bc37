//! In-memory request store

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use estateflow_core::RequestStatus;
use serde::Serialize;

use crate::error::LedgerError;
use crate::id::RequestIdGenerator;
use crate::request::{LoanRequest, NewLoanRequest, RequestId, RequestPatch};
use crate::seed;

/// Authoritative collection of loan requests for one session.
///
/// Visible order is most-recent-first: new requests are inserted at the
/// front and nothing else reorders the collection.
#[derive(Debug, Clone, Default)]
pub struct RequestLedger {
    requests: Vec<LoanRequest>,
    ids: RequestIdGenerator,
    /// Every id ever held, including deleted ones
    issued: HashSet<RequestId>,
}

impl RequestLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger holding the six-property fixture
    pub fn with_seed() -> Self {
        Self::with_requests(seed::initial_requests())
    }

    /// Create a ledger from existing requests, kept in the given order.
    ///
    /// Duplicate ids after the first occurrence are dropped.
    pub fn with_requests(requests: Vec<LoanRequest>) -> Self {
        let mut ledger = Self::new();
        for request in requests {
            if !ledger.issued.insert(request.id.clone()) {
                tracing::warn!(id = %request.id, "Duplicate request id in initial set, skipping");
                continue;
            }
            ledger.ids.observe(&request.id);
            ledger.requests.push(request);
        }
        ledger
    }

    /// Create a request stamped with the current time.
    ///
    /// Input is trusted; see [`crate::validate_new_request`] for the
    /// checks callers run first.
    pub fn add_request(&mut self, data: NewLoanRequest) -> &LoanRequest {
        self.add_request_at(data, Utc::now())
    }

    /// Create a request stamped with `now`
    pub fn add_request_at(&mut self, data: NewLoanRequest, now: DateTime<Utc>) -> &LoanRequest {
        let mut id = self.ids.next_id(now);
        while self.issued.contains(&id) {
            id = self.ids.next_id(now);
        }
        self.issued.insert(id.clone());

        let request = data.into_request(id, now);
        tracing::debug!(
            id = %request.id,
            property = %request.property,
            loan_amount = %request.loan_amount,
            "Request created"
        );

        self.requests.insert(0, request);
        &self.requests[0]
    }

    /// Merge `patch` onto the request with `id`.
    ///
    /// Unknown ids are a silent no-op; the return value reports whether a
    /// request was updated.
    pub fn update_request(&mut self, id: &str, patch: RequestPatch) -> bool {
        match self.get_mut(id) {
            Some(request) => {
                patch.apply(request);
                tracing::debug!(id, "Request updated");
                true
            }
            None => {
                tracing::debug!(id, "Update ignored, request not found");
                false
            }
        }
    }

    /// Remove the request with `id`, returning it if present.
    ///
    /// Unknown ids are a silent no-op. The id stays reserved.
    pub fn delete_request(&mut self, id: &str) -> Option<LoanRequest> {
        let Some(pos) = self.requests.iter().position(|r| r.id == id) else {
            tracing::debug!(id, "Delete ignored, request not found");
            return None;
        };
        tracing::debug!(id, "Request deleted");
        Some(self.requests.remove(pos))
    }

    /// Move a request along the lifecycle table.
    ///
    /// Unlike [`Self::update_request`] this reports unknown ids and rejects
    /// transitions the table does not allow.
    pub fn transition_status(
        &mut self,
        id: &str,
        next: RequestStatus,
    ) -> Result<&LoanRequest, LedgerError> {
        let request = self
            .get_mut(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

        let from = request.status;
        if !from.can_transition_to(next) {
            tracing::warn!(id, %from, to = %next, "Rejected status transition");
            return Err(LedgerError::IllegalTransition {
                id: id.to_string(),
                from,
                to: next,
            });
        }

        request.status = next;
        tracing::info!(id, %from, to = %next, "Request status changed");
        Ok(request)
    }

    /// All requests in visible order
    pub fn requests(&self) -> &[LoanRequest] {
        &self.requests
    }

    pub fn get(&self, id: &str) -> Option<&LoanRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut LoanRequest> {
        self.requests.iter_mut().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Requests with `status`, in visible order
    pub fn by_status(&self, status: RequestStatus) -> Vec<&LoanRequest> {
        self.requests.iter().filter(|r| r.status == status).collect()
    }

    /// Per-status totals
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for request in &self.requests {
            match request.status {
                RequestStatus::Open => counts.open += 1,
                RequestStatus::Pending => counts.pending += 1,
                RequestStatus::Completed => counts.completed += 1,
                RequestStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}

/// Number of requests in each status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub open: usize,
    pub pending: usize,
    pub completed: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.open + self.pending + self.completed + self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use estateflow_core::Amount;
    use rust_decimal_macros::dec;

    fn test_villa() -> NewLoanRequest {
        NewLoanRequest {
            property: "Test Villa".to_string(),
            rate: dec!(6.0),
            months: 24,
            total_proofs: 6,
            loan_amount: Amount::from_dollars(200_000),
            image: "/x.png".to_string(),
            description: None,
            collateral_type: None,
            yield_preference: None,
        }
    }

    fn ids(ledger: &RequestLedger) -> Vec<String> {
        ledger.requests().iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_add_to_empty_ledger() {
        let mut ledger = RequestLedger::new();
        let before = Utc::now();
        let created = ledger.add_request(test_villa()).clone();
        let after = Utc::now();

        assert_eq!(ledger.len(), 1);
        assert_eq!(created.status, RequestStatus::Open);
        assert_eq!(created.proof_submitted, 0);
        assert_eq!(created.total_proofs, 6);
        assert!(created.created_at >= before && created.created_at <= after);
        assert_eq!(ledger.requests()[0], created);
    }

    #[test]
    fn test_new_requests_are_prepended() {
        let mut ledger = RequestLedger::with_seed();
        let id = ledger.add_request(test_villa()).id.clone();

        assert_eq!(ledger.len(), 7);
        assert_eq!(ledger.requests()[0].id, id);
        assert_eq!(ledger.requests()[1].id, "p1");
    }

    #[test]
    fn test_ids_unique_within_same_instant() {
        let mut ledger = RequestLedger::new();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

        let a = ledger.add_request_at(test_villa(), now).id.clone();
        let b = ledger.add_request_at(test_villa(), now).id.clone();

        assert_ne!(a, b);
    }

    #[test]
    fn test_deleted_id_never_reissued() {
        let mut ledger = RequestLedger::new();
        let now = Utc.timestamp_millis_opt(5_000).unwrap();

        let first = ledger.add_request_at(test_villa(), now).id.clone();
        ledger.delete_request(&first);

        // Same instant again: the generator must move past the deleted id
        let second = ledger.add_request_at(test_villa(), now).id.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_update_status_leaves_other_fields() {
        let mut ledger = RequestLedger::with_seed();
        let before = ledger.get("p3").unwrap().clone();

        let updated = ledger.update_request("p3", RequestPatch::new().status(RequestStatus::Completed));
        assert!(updated);

        let after = ledger.get("p3").unwrap();
        assert_eq!(after.status, RequestStatus::Completed);
        assert_eq!(
            LoanRequest {
                status: before.status,
                ..after.clone()
            },
            before
        );
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut ledger = RequestLedger::with_seed();
        let snapshot = ledger.requests().to_vec();

        let updated = ledger.update_request("p999", RequestPatch::new().status(RequestStatus::Rejected));

        assert!(!updated);
        assert_eq!(ledger.requests(), snapshot.as_slice());
    }

    #[test]
    fn test_delete_seeded_request() {
        let mut ledger = RequestLedger::with_seed();
        let removed = ledger.delete_request("p1");

        assert_eq!(removed.map(|r| r.property), Some("Jaipur Palace".to_string()));
        assert_eq!(ledger.len(), 5);
        assert!(!ledger.contains("p1"));
        assert_eq!(ids(&ledger), vec!["p2", "p3", "p4", "p5", "p6"]);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut ledger = RequestLedger::with_seed();
        let order = ids(&ledger);

        assert!(ledger.delete_request("nope").is_none());
        assert_eq!(ids(&ledger), order);

        ledger.delete_request("p2");
        assert!(ledger.delete_request("p2").is_none());
        assert_eq!(ledger.len(), 5);
    }

    #[test]
    fn test_transition_follows_table() {
        let mut ledger = RequestLedger::with_seed();

        let req = ledger.transition_status("p1", RequestStatus::Pending).unwrap();
        assert_eq!(req.status, RequestStatus::Pending);

        let req = ledger.transition_status("p1", RequestStatus::Completed).unwrap();
        assert_eq!(req.status, RequestStatus::Completed);

        let err = ledger.transition_status("p1", RequestStatus::Open).unwrap_err();
        assert_eq!(
            err,
            LedgerError::IllegalTransition {
                id: "p1".to_string(),
                from: RequestStatus::Completed,
                to: RequestStatus::Open,
            }
        );
        assert_eq!(ledger.get("p1").unwrap().status, RequestStatus::Completed);
    }

    #[test]
    fn test_transition_unknown_id() {
        let mut ledger = RequestLedger::new();
        let err = ledger.transition_status("p1", RequestStatus::Pending).unwrap_err();
        assert_eq!(err, LedgerError::NotFound("p1".to_string()));
    }

    #[test]
    fn test_status_filter_and_counts() {
        let ledger = RequestLedger::with_seed();

        let pending: Vec<_> = ledger
            .by_status(RequestStatus::Pending)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(pending, vec!["p2", "p5"]);

        let counts = ledger.counts();
        assert_eq!(counts.open, 4);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.completed, 0);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_with_requests_skips_duplicate_ids() {
        let mut requests = seed::initial_requests();
        requests.push(requests[0].clone());

        let ledger = RequestLedger::with_requests(requests);
        assert_eq!(ledger.len(), 6);
    }

    #[test]
    fn test_add_after_oversized_seed_id() {
        let mut requests = seed::initial_requests();
        requests[0].id = format!("p{}", u64::MAX);
        let mut ledger = RequestLedger::with_requests(requests);

        let id = ledger.add_request(test_villa()).id.clone();
        assert_ne!(id, format!("p{}", u64::MAX));
        assert_eq!(ledger.len(), 7);
        assert_eq!(ledger.requests()[0].id, id);
    }
}
