//! Element fixtures that make construction and destruction observable.

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt;
use std::rc::Rc;

/// Shared record of dropped element IDs, in drop order.
///
/// Also carries an optional clone budget consumed by [`FlakyClone`].
#[derive(Clone, Default)]
pub struct DropLog {
    dropped: Rc<RefCell<Vec<u32>>>,
    clone_budget: Rc<Cell<Option<usize>>>,
}

impl DropLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// IDs dropped so far, oldest first.
    pub fn dropped(&self) -> Vec<u32> {
        self.dropped.borrow().clone()
    }

    /// Number of drops recorded.
    pub fn len(&self) -> usize {
        self.dropped.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.dropped.borrow().is_empty()
    }

    /// Allow `n` more `FlakyClone::clone` calls; the next one panics.
    pub fn set_clone_budget(&self, n: usize) {
        self.clone_budget.set(Some(n));
    }

    fn record(&self, id: u32) {
        self.dropped.borrow_mut().push(id);
    }

    fn spend_clone(&self) -> bool {
        match self.clone_budget.get() {
            None => true,
            Some(0) => false,
            Some(n) => {
                self.clone_budget.set(Some(n - 1));
                true
            }
        }
    }
}

/// An element that appends its ID to a [`DropLog`] when dropped.
///
/// Clones share the ID, so a log entry per live value means every value
/// was dropped exactly once.
#[derive(Clone)]
pub struct Tracked {
    id: u32,
    log: DropLog,
}

impl Tracked {
    pub fn new(id: u32, log: &DropLog) -> Self {
        Self {
            id,
            log: log.clone(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.log.record(self.id);
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.id)
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Returned by [`FlakyClone::try_copy`] when the copy is refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyFailed {
    pub id: u32,
}

impl fmt::Display for CopyFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "copy of element {} refused", self.id)
    }
}

impl Error for CopyFailed {}

/// A [`Tracked`] element whose copy operation can fail.
///
/// `Clone` panics once the log's clone budget is spent;
/// [`try_copy`](Self::try_copy) returns an error for a chosen ID.
#[derive(Debug, PartialEq)]
pub struct FlakyClone {
    inner: Tracked,
}

impl FlakyClone {
    pub fn new(id: u32, log: &DropLog) -> Self {
        Self {
            inner: Tracked::new(id, log),
        }
    }

    pub fn id(&self) -> u32 {
        self.inner.id
    }

    /// Copy this element unless its ID equals `fail_at`.
    pub fn try_copy(&self, fail_at: u32) -> Result<Self, CopyFailed> {
        if self.inner.id == fail_at {
            Err(CopyFailed { id: fail_at })
        } else {
            Ok(Self {
                inner: self.inner.clone(),
            })
        }
    }
}

impl Clone for FlakyClone {
    fn clone(&self) -> Self {
        assert!(
            self.inner.log.spend_clone(),
            "clone budget exhausted at element {}",
            self.inner.id
        );
        Self {
            inner: self.inner.clone(),
        }
    }
}
