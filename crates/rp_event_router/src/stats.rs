//! Dispatch counters.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of the router's dispatch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterStats {
    /// Events whose handler ran to completion
    pub delivered: u64,
    /// Events dropped because no registration matched
    pub unknown: u64,
    /// Character-gated events dropped because the client had no character
    pub unauthorized: u64,
    /// Events whose invocation failed
    pub failed: u64,
}

impl RouterStats {
    /// Total number of dispatch calls observed.
    pub fn total(&self) -> u64 {
        self.delivered + self.unknown + self.unauthorized + self.failed
    }
}

#[derive(Debug, Default)]
pub(crate) struct RouterCounters {
    pub(crate) delivered: AtomicU64,
    pub(crate) unknown: AtomicU64,
    pub(crate) unauthorized: AtomicU64,
    pub(crate) failed: AtomicU64,
}

impl RouterCounters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> RouterStats {
        RouterStats {
            delivered: self.delivered.load(Ordering::Relaxed),
            unknown: self.unknown.load(Ordering::Relaxed),
            unauthorized: self.unauthorized.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
