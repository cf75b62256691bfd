//! Allocation and mutation counters for a single container.
//!
//! [`ArrayMetrics`] is updated by every structural operation and read back
//! through [`DynamicArray::metrics`](crate::DynamicArray::metrics), giving
//! benchmarks and callers a view of how often growth and relocation happen.

/// Cumulative counters for one container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArrayMetrics {
    /// Number of successful insertions.
    pub inserts: u64,
    /// Number of successful removals (`remove_at`, `pop`, `clear` count each element).
    pub removals: u64,
    /// Number of buffer reallocations.
    pub grow_events: u64,
    /// Total elements relocated from an old buffer into a new one.
    pub relocated_elements: u64,
    /// Largest capacity the container has held, in elements.
    pub peak_capacity: usize,
}
