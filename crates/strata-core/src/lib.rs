//! Core types for the strata dynamic array.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! identifiers that cursors use to validate themselves against a container
//! and the error enum shared by every fallible container operation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;

pub use error::ArrayError;
pub use id::{ArrayInstanceId, Generation};
