//! Test utilities and fixtures for strata development.
//!
//! Provides element types that record when they are dropped
//! ([`Tracked`]), element types whose copies can fail on demand
//! ([`FlakyClone`]), and an operation script ([`ArrayOp`]) with a `Vec`
//! reference model for differential testing.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod elements;
pub mod ops;

pub use elements::{CopyFailed, DropLog, FlakyClone, Tracked};
pub use ops::{arb_ops, ArrayOp};
