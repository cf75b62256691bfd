//! Strongly-typed identifiers for containers and their structural versions.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ArrayInstanceId`] allocation.
static ARRAY_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a container.
///
/// Allocated from a monotonic atomic counter via [`ArrayInstanceId::next`].
/// Two distinct containers always have different IDs, even when they hold
/// equal elements. Cursors record the ID of the container they were created
/// on, so a cursor presented to a different container is rejected instead
/// of silently indexing into unrelated storage.
///
/// Cloning a container allocates a fresh ID for the copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArrayInstanceId(u64);

impl ArrayInstanceId {
    /// Allocate a fresh, unique instance ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(ARRAY_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArrayInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structural version of a container.
///
/// Incremented every time the container's length changes or its backing
/// buffer is reallocated. Element writes through `get_mut` or a cursor's
/// `set` leave it untouched. A cursor whose captured generation differs
/// from the container's current one is stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation of a freshly constructed container.
    pub const INITIAL: Self = Self(0);

    /// The generation that follows this one.
    ///
    /// Wraps on overflow; at one bump per nanosecond that takes centuries.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Generation {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
