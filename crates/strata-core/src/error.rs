//! Error types for the strata dynamic array.
//!
//! Two recoverable classes live here: allocation failures raised by
//! construction and growth, and cursor failures raised when a traversal
//! view is used after its container changed shape. Index contract
//! violations are programmer errors and panic instead.

use std::error::Error;
use std::fmt;

use crate::id::{ArrayInstanceId, Generation};

/// Errors that can occur during container operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// The global allocator could not satisfy the request.
    AllocationFailed {
        /// Number of bytes requested.
        requested_bytes: usize,
    },
    /// The requested capacity does not fit in a valid allocation layout
    /// (its byte size overflows `isize::MAX`).
    CapacityOverflow {
        /// Requested capacity in elements.
        requested: usize,
    },
    /// The container is configured with a capacity ceiling and growth
    /// would exceed it.
    CapacityExceeded {
        /// Requested capacity in elements.
        requested: usize,
        /// Configured maximum capacity in elements.
        max: usize,
    },
    /// An `ArrayConfig` failed validation.
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// The container was structurally modified after the cursor was created.
    StaleView {
        /// Generation captured when the cursor was created.
        view_generation: Generation,
        /// Generation of the container at the time of the failed operation.
        current_generation: Generation,
    },
    /// The cursor was created on a different container.
    ForeignView {
        /// Container the cursor was created on.
        view_instance: ArrayInstanceId,
        /// Container the cursor was presented to.
        array_instance: ArrayInstanceId,
    },
    /// The cursor has moved past the last element in its direction.
    CursorExhausted,
}

impl ArrayError {
    /// Whether this error came from a cursor rather than from allocation.
    pub fn is_view_error(&self) -> bool {
        matches!(
            self,
            Self::StaleView { .. } | Self::ForeignView { .. } | Self::CursorExhausted
        )
    }
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested_bytes } => {
                write!(f, "allocation failed: requested {requested_bytes} bytes")
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} elements do not fit in memory")
            }
            Self::CapacityExceeded { requested, max } => {
                write!(
                    f,
                    "capacity exceeded: requested {requested} elements, max {max}"
                )
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid array config: {reason}")
            }
            Self::StaleView {
                view_generation,
                current_generation,
            } => {
                write!(
                    f,
                    "container was modified during traversal: view generation {view_generation}, \
                     current generation {current_generation}"
                )
            }
            Self::ForeignView {
                view_instance,
                array_instance,
            } => {
                write!(
                    f,
                    "cursor belongs to array {view_instance}, not array {array_instance}"
                )
            }
            Self::CursorExhausted => write!(f, "cursor is past the end of the array"),
        }
    }
}

impl Error for ArrayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_view_message_mentions_traversal() {
        let err = ArrayError::StaleView {
            view_generation: Generation(3),
            current_generation: Generation(5),
        };
        let msg = err.to_string();
        assert!(msg.contains("modified during traversal"));
        assert!(msg.contains('3'));
        assert!(msg.contains('5'));
    }

    #[test]
    fn view_errors_are_classified() {
        assert!(ArrayError::CursorExhausted.is_view_error());
        assert!(ArrayError::StaleView {
            view_generation: Generation(0),
            current_generation: Generation(1),
        }
        .is_view_error());
        assert!(!ArrayError::AllocationFailed { requested_bytes: 8 }.is_view_error());
        assert!(!ArrayError::CapacityOverflow { requested: 1 }.is_view_error());
    }

    #[test]
    fn capacity_exceeded_display() {
        let err = ArrayError::CapacityExceeded {
            requested: 20,
            max: 16,
        };
        assert_eq!(
            err.to_string(),
            "capacity exceeded: requested 20 elements, max 16"
        );
    }
}
