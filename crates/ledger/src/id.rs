//! Request id generation
//!
//! Ids have the form `p<n>` where `n` is the creation time in milliseconds
//! since the Unix epoch. A high-water mark makes `n` strictly increasing, so
//! two requests created in the same millisecond, or after a clock step
//! backwards, still receive distinct ids and a deleted id is never issued
//! again.

use chrono::{DateTime, Utc};

use crate::request::RequestId;

const PREFIX: char = 'p';

/// Largest sequence `observe` accepts; millisecond timestamps never exceed it
const MAX_SEQUENCE: u64 = i64::MAX as u64;

/// Monotonic, time-derived id source owned by one ledger
#[derive(Debug, Clone, Default)]
pub struct RequestIdGenerator {
    last: u64,
}

impl RequestIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id for a request created at `now`
    pub fn next_id(&mut self, now: DateTime<Utc>) -> RequestId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let n = millis.max(self.last.saturating_add(1));
        self.last = n;
        format!("{PREFIX}{n}")
    }

    /// Raise the high-water mark past an externally supplied id
    /// (seed fixtures). Ids outside the `p<n>` scheme, or with `n` beyond
    /// any timestamp, are ignored.
    pub fn observe(&mut self, id: &str) {
        if let Some(n) = parse_sequence(id).filter(|&n| n <= MAX_SEQUENCE) {
            self.last = self.last.max(n);
        }
    }

    pub fn last_issued(&self) -> u64 {
        self.last
    }
}

fn parse_sequence(id: &str) -> Option<u64> {
    id.strip_prefix(PREFIX)?.parse().ok()
}
