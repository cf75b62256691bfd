//! Generation-checked traversal cursors.
//!
//! A [`Cursor`] never borrows the container it walks. It records the
//! container's identity, the generation at creation time, the length at
//! that generation, and its own position. Each operation takes the
//! container as an argument and first checks identity and generation, so a
//! cursor that outlives an insertion or removal reports
//! [`ArrayError::StaleView`] instead of reading shifted or freed slots.
//!
//! Four kinds exist, combining a direction marker ([`Forward`], [`Reverse`])
//! with an access marker ([`Mutable`], [`Const`]). Only mutable cursors have
//! [`set`](Cursor::set) and [`get_mut`](Cursor::get_mut).
//!
//! ```
//! use strata_array::DynamicArray;
//!
//! let mut arr = DynamicArray::new();
//! for v in 1..=3 {
//!     arr.insert(v).unwrap();
//! }
//! let mut cursor = arr.reverse_const_cursor();
//! let mut seen = Vec::new();
//! while cursor.has_next(&arr).unwrap() {
//!     seen.push(*cursor.get(&arr).unwrap());
//!     cursor.advance(&arr).unwrap();
//! }
//! assert_eq!(seen, [3, 2, 1]);
//! ```

use std::fmt;
use std::marker::PhantomData;

use strata_core::{ArrayError, ArrayInstanceId, Generation};

use crate::array::DynamicArray;

mod sealed {
    pub trait Sealed {}
}

/// Traversal direction of a [`Cursor`].
pub trait Direction: sealed::Sealed {
    /// Short name used in `Debug` output.
    const NAME: &'static str;

    #[doc(hidden)]
    fn start(len: usize) -> usize;

    #[doc(hidden)]
    fn index(position: usize, len: usize) -> Option<usize>;

    #[doc(hidden)]
    fn step(position: usize) -> usize;
}

/// Element access granted by a [`Cursor`].
pub trait Access: sealed::Sealed {
    /// Short name used in `Debug` output.
    const NAME: &'static str;
}

/// Index 0 towards `len - 1`.
#[derive(Debug)]
pub enum Forward {}

/// Index `len - 1` towards 0.
#[derive(Debug)]
pub enum Reverse {}

/// The cursor may overwrite elements.
#[derive(Debug)]
pub enum Mutable {}

/// The cursor is read-only.
#[derive(Debug)]
pub enum Const {}

impl sealed::Sealed for Forward {}
impl sealed::Sealed for Reverse {}
impl sealed::Sealed for Mutable {}
impl sealed::Sealed for Const {}

// Positions are element indices for forward cursors and "elements
// remaining" for reverse cursors, so both directions count towards a
// terminal value without underflow.

impl Direction for Forward {
    const NAME: &'static str = "forward";

    fn start(_len: usize) -> usize {
        0
    }

    fn index(position: usize, len: usize) -> Option<usize> {
        (position < len).then_some(position)
    }

    fn step(position: usize) -> usize {
        position + 1
    }
}

impl Direction for Reverse {
    const NAME: &'static str = "reverse";

    fn start(len: usize) -> usize {
        len
    }

    fn index(position: usize, len: usize) -> Option<usize> {
        (position > 0 && position <= len).then(|| position - 1)
    }

    fn step(position: usize) -> usize {
        position.saturating_sub(1)
    }
}

impl Access for Mutable {
    const NAME: &'static str = "mutable";
}

impl Access for Const {
    const NAME: &'static str = "const";
}

/// Forward cursor that can overwrite elements.
pub type ForwardCursor = Cursor<Forward, Mutable>;
/// Read-only forward cursor.
pub type ForwardConstCursor = Cursor<Forward, Const>;
/// Reverse cursor that can overwrite elements.
pub type ReverseCursor = Cursor<Reverse, Mutable>;
/// Read-only reverse cursor.
pub type ReverseConstCursor = Cursor<Reverse, Const>;

/// Lifecycle of a cursor.
///
/// `Active → Exhausted` by advancing; any state → `Invalidated` as soon as
/// an operation observes a structural change. `Invalidated` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// Positioned on an element.
    Active,
    /// Moved past the last element in its direction.
    Exhausted,
    /// Observed a mismatch with its container; every later call fails.
    Invalidated,
}

/// A traversal handle over a [`DynamicArray`], validated on every use.
///
/// Created by [`DynamicArray::cursor`], [`DynamicArray::const_cursor`],
/// [`DynamicArray::reverse_cursor`] and
/// [`DynamicArray::reverse_const_cursor`].
#[must_use]
pub struct Cursor<D: Direction, A: Access> {
    instance: ArrayInstanceId,
    stamp: Generation,
    len: usize,
    position: usize,
    fault: Option<ArrayError>,
    _kind: PhantomData<fn() -> (D, A)>,
}

impl<D: Direction, A: Access> Cursor<D, A> {
    pub(crate) fn new(instance: ArrayInstanceId, stamp: Generation, len: usize) -> Self {
        Self {
            instance,
            stamp,
            len,
            position: D::start(len),
            fault: None,
            _kind: PhantomData,
        }
    }

    /// Current lifecycle state, as of the last operation.
    pub fn state(&self) -> CursorState {
        if self.fault.is_some() {
            CursorState::Invalidated
        } else if self.index().is_some() {
            CursorState::Active
        } else {
            CursorState::Exhausted
        }
    }

    /// Index of the element under the cursor, or `None` once exhausted or
    /// invalidated.
    pub fn index(&self) -> Option<usize> {
        if self.fault.is_some() {
            return None;
        }
        D::index(self.position, self.len)
    }

    /// Generation of the container when this cursor was created.
    pub fn generation(&self) -> Generation {
        self.stamp
    }

    /// Whether an element is under the cursor.
    pub fn has_next<T>(&mut self, array: &DynamicArray<T>) -> Result<bool, ArrayError> {
        self.validate(array)?;
        Ok(self.index().is_some())
    }

    /// Reference to the element under the cursor.
    pub fn get<'a, T>(&mut self, array: &'a DynamicArray<T>) -> Result<&'a T, ArrayError> {
        let index = self.current(array)?;
        Ok(array.get(index))
    }

    /// Step one element in the cursor's direction.
    ///
    /// Fails with [`ArrayError::CursorExhausted`] if there is no element
    /// under the cursor.
    pub fn advance<T>(&mut self, array: &DynamicArray<T>) -> Result<(), ArrayError> {
        self.current(array)?;
        self.position = D::step(self.position);
        Ok(())
    }

    fn current<T>(&mut self, array: &DynamicArray<T>) -> Result<usize, ArrayError> {
        self.validate(array)?;
        self.index().ok_or(ArrayError::CursorExhausted)
    }

    fn validate<T>(&mut self, array: &DynamicArray<T>) -> Result<(), ArrayError> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        let fault = if array.instance_id() != self.instance {
            ArrayError::ForeignView {
                view_instance: self.instance,
                array_instance: array.instance_id(),
            }
        } else if array.generation() != self.stamp {
            ArrayError::StaleView {
                view_generation: self.stamp,
                current_generation: array.generation(),
            }
        } else {
            return Ok(());
        };
        tracing::trace!(
            direction = D::NAME,
            access = A::NAME,
            error = %fault,
            "cursor invalidated"
        );
        self.fault = Some(fault.clone());
        Err(fault)
    }
}

impl<D: Direction> Cursor<D, Mutable> {
    /// Overwrite the element under the cursor.
    ///
    /// Not a structural change: other cursors on the same container stay
    /// valid.
    pub fn set<T>(&mut self, array: &mut DynamicArray<T>, value: T) -> Result<(), ArrayError> {
        *self.get_mut(array)? = value;
        Ok(())
    }

    /// Mutable reference to the element under the cursor.
    pub fn get_mut<'a, T>(
        &mut self,
        array: &'a mut DynamicArray<T>,
    ) -> Result<&'a mut T, ArrayError> {
        let index = self.current(array)?;
        Ok(array.get_mut(index))
    }
}

impl<D: Direction, A: Access> Clone for Cursor<D, A> {
    fn clone(&self) -> Self {
        Self {
            instance: self.instance,
            stamp: self.stamp,
            len: self.len,
            position: self.position,
            fault: self.fault.clone(),
            _kind: PhantomData,
        }
    }
}

impl<D: Direction, A: Access> fmt::Debug for Cursor<D, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("direction", &D::NAME)
            .field("access", &A::NAME)
            .field("array", &self.instance)
            .field("generation", &self.stamp)
            .field("index", &self.index())
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_to_five() -> DynamicArray<i32> {
        let mut arr = DynamicArray::new();
        for v in 1..=5 {
            arr.insert(v).unwrap();
        }
        arr
    }

    fn drain<D: Direction, A: Access>(
        mut cursor: Cursor<D, A>,
        arr: &DynamicArray<i32>,
    ) -> Vec<i32> {
        let mut out = Vec::new();
        while cursor.has_next(arr).unwrap() {
            out.push(*cursor.get(arr).unwrap());
            cursor.advance(arr).unwrap();
        }
        assert_eq!(cursor.state(), CursorState::Exhausted);
        out
    }

    #[test]
    fn forward_yields_index_order() {
        let arr = one_to_five();
        assert_eq!(drain(arr.cursor(), &arr), vec![1, 2, 3, 4, 5]);
        assert_eq!(drain(arr.const_cursor(), &arr), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn reverse_yields_reverse_order() {
        let arr = one_to_five();
        assert_eq!(drain(arr.reverse_cursor(), &arr), vec![5, 4, 3, 2, 1]);
        assert_eq!(drain(arr.reverse_const_cursor(), &arr), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn empty_array_cursors_start_exhausted() {
        let arr = DynamicArray::<i32>::new();
        let mut fwd = arr.const_cursor();
        let mut rev = arr.reverse_const_cursor();
        assert_eq!(fwd.state(), CursorState::Exhausted);
        assert!(!fwd.has_next(&arr).unwrap());
        assert!(!rev.has_next(&arr).unwrap());
        assert_eq!(rev.get(&arr), Err(ArrayError::CursorExhausted));
        assert_eq!(fwd.advance(&arr), Err(ArrayError::CursorExhausted));
    }

    #[test]
    fn set_overwrites_without_invalidating() {
        let mut arr = one_to_five();
        let mut writer = arr.cursor();
        let mut reader = arr.reverse_const_cursor();
        while writer.has_next(&arr).unwrap() {
            let doubled = *writer.get(&arr).unwrap() * 2;
            writer.set(&mut arr, doubled).unwrap();
            writer.advance(&arr).unwrap();
        }
        assert_eq!(arr, [2, 4, 6, 8, 10]);
        assert_eq!(*reader.get(&arr).unwrap(), 10);
    }

    #[test]
    fn reverse_mutable_get_mut() {
        let mut arr = one_to_five();
        let mut cursor = arr.reverse_cursor();
        *cursor.get_mut(&mut arr).unwrap() = 50;
        cursor.advance(&arr).unwrap();
        cursor.set(&mut arr, 40).unwrap();
        assert_eq!(arr, [1, 2, 3, 40, 50]);
    }

    #[test]
    fn insert_invalidates_outstanding_cursor() {
        let mut arr = one_to_five();
        let mut cursor = arr.const_cursor();
        cursor.advance(&arr).unwrap();
        let created_at = cursor.generation();
        arr.insert(6).unwrap();

        let err = cursor.get(&arr).unwrap_err();
        assert_eq!(
            err,
            ArrayError::StaleView {
                view_generation: created_at,
                current_generation: arr.generation(),
            }
        );
        assert_eq!(cursor.state(), CursorState::Invalidated);
        assert!(cursor.index().is_none());
    }

    #[test]
    fn remove_invalidates_every_operation() {
        let mut arr = one_to_five();
        let mut cursor = arr.reverse_cursor();
        arr.remove_at(0);
        assert!(matches!(cursor.has_next(&arr), Err(ArrayError::StaleView { .. })));
        assert!(matches!(cursor.advance(&arr), Err(ArrayError::StaleView { .. })));
        assert!(matches!(cursor.get(&arr), Err(ArrayError::StaleView { .. })));
        assert!(matches!(
            cursor.set(&mut arr, 0),
            Err(ArrayError::StaleView { .. })
        ));
        assert_eq!(arr, [2, 3, 4, 5]);
    }

    #[test]
    fn exhausted_cursor_is_invalidated_by_mutation() {
        let mut arr = one_to_five();
        let mut cursor = arr.const_cursor();
        while cursor.has_next(&arr).unwrap() {
            cursor.advance(&arr).unwrap();
        }
        arr.insert(6).unwrap();
        assert!(matches!(cursor.has_next(&arr), Err(ArrayError::StaleView { .. })));
    }

    #[test]
    fn invalidation_is_terminal() {
        let mut arr = one_to_five();
        let other = one_to_five();
        let mut cursor = other.const_cursor();
        assert!(matches!(cursor.get(&arr), Err(ArrayError::ForeignView { .. })));
        // Presenting the right container afterwards does not revive it.
        assert!(matches!(cursor.get(&other), Err(ArrayError::ForeignView { .. })));
        assert_eq!(cursor.state(), CursorState::Invalidated);
        arr.insert(0).unwrap();
    }

    #[test]
    fn cursor_survives_move_of_its_container() {
        let mut arr = one_to_five();
        let mut cursor = arr.const_cursor();
        let moved = arr.take();
        assert_eq!(*cursor.get(&moved).unwrap(), 1);
        let mut on_source = moved.const_cursor();
        assert!(matches!(
            on_source.get(&arr),
            Err(ArrayError::ForeignView { .. })
        ));
    }

    #[test]
    fn copy_has_its_own_identity() {
        let arr = one_to_five();
        let copy = arr.clone();
        let mut cursor = arr.const_cursor();
        assert!(matches!(cursor.get(&copy), Err(ArrayError::ForeignView { .. })));
    }

    #[test]
    fn unmutated_cursor_never_fails() {
        let mut arr = one_to_five();
        let mut cursor = arr.cursor();
        for _ in 0..3 {
            let v = *cursor.get(&arr).unwrap();
            cursor.set(&mut arr, v + 100).unwrap();
            arr[4] = 0;
            cursor.advance(&arr).unwrap();
        }
        assert_eq!(cursor.index(), Some(3));
        assert_eq!(arr, [101, 102, 103, 4, 0]);
    }

    #[test]
    fn debug_output_names_kind() {
        let arr = one_to_five();
        let rendered = format!("{:?}", arr.reverse_const_cursor());
        assert!(rendered.contains("reverse"));
        assert!(rendered.contains("const"));
        assert!(rendered.contains("Active"));
    }
}
