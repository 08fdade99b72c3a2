//! Last-submitted-wins bookkeeping for overlapping searches.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one submitted search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

/// Tracks the newest search so late results of older ones can be dropped.
#[derive(Debug, Default)]
pub struct SearchSession {
    latest: AtomicU64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search. Any previously issued ticket becomes stale.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Keep `value` only if `ticket` is still the newest search.
    pub fn accept<T>(&self, ticket: SearchTicket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}
