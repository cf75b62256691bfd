//! Generation-checked dynamic array with manual allocation.
//!
//! [`DynamicArray`] stores its elements contiguously in a buffer obtained
//! directly from the global allocator, constructs and drops each element
//! explicitly, and grows by a configurable factor when full. Traversal is
//! offered two ways:
//!
//! - borrowing iterators (`iter`, `iter_mut`, `for x in &array`), which the
//!   borrow checker keeps valid statically;
//! - detached [`cursor`] handles in four kinds (forward/reverse ×
//!   mutable/const), which hold no borrow and instead check the container's
//!   [`Generation`](strata_core::Generation) on every call.
//!
//! This crate is the only one in the workspace that contains `unsafe`
//! code. It is confined to `raw.rs` (allocation) and `array.rs` (slot
//! reads and writes), and every block carries a `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod config;
pub mod cursor;
pub mod error;
pub mod metrics;
mod raw;

// Public re-exports for the primary API surface.
pub use array::DynamicArray;
pub use config::ArrayConfig;
pub use cursor::{
    Cursor, CursorState, ForwardConstCursor, ForwardCursor, ReverseConstCursor, ReverseCursor,
};
pub use error::CloneError;
pub use metrics::ArrayMetrics;
pub use strata_core::{ArrayError, ArrayInstanceId, Generation};
