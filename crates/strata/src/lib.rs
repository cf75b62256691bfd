//! Strata: a growable contiguous array with generation-checked cursors.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the strata sub-crates. For most users, adding `strata` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! let mut arr = DynamicArray::new();
//! for v in [10, 20, 30] {
//!     arr.insert(v).unwrap();
//! }
//! arr.insert_at(0, 5).unwrap();
//!
//! let mut cursor = arr.const_cursor();
//! assert_eq!(*cursor.get(&arr).unwrap(), 5);
//!
//! // A structural change makes every outstanding cursor stale.
//! arr.remove_at(2);
//! assert!(matches!(cursor.get(&arr), Err(ArrayError::StaleView { .. })));
//! assert_eq!(arr, [5, 10, 30]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`array`] | `strata-array` | `DynamicArray`, cursors, config, metrics |
//! | [`types`] | `strata-core` | Identifiers and the error enum |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Identifiers and error types (`strata-core`).
///
/// [`types::Generation`] and [`types::ArrayInstanceId`] are what cursors
/// compare against; [`types::ArrayError`] is returned by every fallible
/// operation.
pub use strata_core as types;

/// The container, its cursors and configuration (`strata-array`).
///
/// [`array::DynamicArray`] is the main type; [`array::Cursor`] covers the
/// four traversal kinds.
pub use strata_array as array;

/// Common imports for typical strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Container and config
    pub use strata_array::{ArrayConfig, ArrayMetrics, DynamicArray};

    // Cursors
    pub use strata_array::{
        CursorState, ForwardConstCursor, ForwardCursor, ReverseConstCursor, ReverseCursor,
    };

    // Errors and identifiers
    pub use strata_array::CloneError;
    pub use strata_core::{ArrayError, ArrayInstanceId, Generation};
}
