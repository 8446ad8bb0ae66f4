//! Lookup statistics tracking.
//!
//! Thread-safe counters for successful lookups and each failure kind.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FailureKind;

/// Thread-safe lookup statistics tracker.
///
/// Every [`FailureKind`] is initialized to zero on creation, so counters can be
/// shared across tasks behind an `Arc` without further locking.
pub struct LookupStats {
    succeeded: AtomicUsize,
    failures: HashMap<FailureKind, AtomicUsize>,
}

impl LookupStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in FailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }

        LookupStats {
            succeeded: AtomicUsize::new(0),
            failures,
        }
    }

    /// Counts a lookup whose result was published.
    pub fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment a failure counter.
    pub fn record_failure(&self, kind: FailureKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in LookupStats initialization.",
                kind
            );
        }
    }

    /// Number of published results.
    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::SeqCst)
    }

    /// Get the count for a failure kind.
    pub fn failure_count(&self, kind: FailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Failures the user would have seen as "Invalid input".
    pub fn user_visible_failures(&self) -> usize {
        self.failure_count(FailureKind::EmptyInput) + self.failure_count(FailureKind::LookupFailed)
    }

    /// Failures of every kind, including superseded lookups.
    pub fn total_failures(&self) -> usize {
        FailureKind::iter().map(|k| self.failure_count(k)).sum()
    }
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}
