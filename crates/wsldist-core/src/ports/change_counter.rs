//! External change counter port.

use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing counter bumped whenever something outside the
/// process may have changed the set of installed distributions.
///
/// The cache only reads it. A snapshot is stale as soon as the value differs
/// from the one captured with it.
pub trait ChangeCounter: Send + Sync {
    fn modification_count(&self) -> u64;
}

impl ChangeCounter for AtomicU64 {
    fn modification_count(&self) -> u64 {
        self.load(Ordering::Acquire)
    }
}
