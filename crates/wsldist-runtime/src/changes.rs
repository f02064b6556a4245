//! External change tracking.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;
use wsldist_core::ports::ChangeCounter;

/// Counts external changes that may affect the set of installed distributions.
///
/// Whatever watches the filesystem calls [`increment`](Self::increment); the
/// distribution cache only reads the count.
#[derive(Debug, Default)]
pub struct ExternalChangesTracker {
    count: AtomicU64,
}

impl ExternalChangesTracker {
    pub const fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
        }
    }

    /// Record a change. Returns the new count.
    pub fn increment(&self) -> u64 {
        let count = self.count.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(count, "External change recorded");
        count
    }
}

impl ChangeCounter for ExternalChangesTracker {
    fn modification_count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_is_monotonic() {
        let tracker = ExternalChangesTracker::new();
        assert_eq!(tracker.modification_count(), 0);
        assert_eq!(tracker.increment(), 1);
        assert_eq!(tracker.increment(), 2);
        assert_eq!(tracker.modification_count(), 2);
    }
}
