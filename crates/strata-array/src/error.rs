//! Errors specific to copying a container.

use std::error::Error;
use std::fmt;

use strata_core::ArrayError;

/// Failure while building a copy with
/// [`DynamicArray::try_clone_with`](crate::DynamicArray::try_clone_with).
///
/// Whichever variant is returned, every element copied before the failure
/// has already been dropped and the copy's buffer released.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CloneError<E> {
    /// The copy's buffer could not be allocated.
    Alloc(ArrayError),
    /// Copying an element failed.
    Element(E),
}

impl<E: fmt::Display> fmt::Display for CloneError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc(err) => write!(f, "copy allocation failed: {err}"),
            Self::Element(err) => write!(f, "element copy failed: {err}"),
        }
    }
}

impl<E: Error + 'static> Error for CloneError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Alloc(err) => Some(err),
            Self::Element(err) => Some(err),
        }
    }
}
