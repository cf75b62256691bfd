//! The growable, contiguously stored container.
//!
//! [`DynamicArray`] owns a raw buffer and a live count. Exactly the first
//! `len` slots hold constructed values; the rest are uninitialised and are
//! never read, copied, or dropped. Every operation that changes `len` or
//! swaps the buffer advances the container's [`Generation`], which is what
//! cursors check before touching an element.
//!
//! Elements are relocated one slot at a time (read out of the source slot,
//! write into the destination slot) when shifting or growing. After the read
//! the source slot is logically uninitialised, so no value is ever live in
//! two slots at once.

#![allow(unsafe_code)]

use std::convert::Infallible;
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr;
use std::slice;

use strata_core::{ArrayError, ArrayInstanceId, Generation};

use crate::config::ArrayConfig;
use crate::cursor::{ForwardConstCursor, ForwardCursor, ReverseConstCursor, ReverseCursor};
use crate::error::CloneError;
use crate::metrics::ArrayMetrics;
use crate::raw::{self, RawBuffer};

/// A contiguous growable array with generation-checked cursors.
///
/// # Indexing
///
/// [`get`](Self::get), [`get_mut`](Self::get_mut), `array[i]`,
/// [`insert_at`](Self::insert_at) and [`remove_at`](Self::remove_at) treat an
/// out-of-range index as a contract violation and panic. Use
/// [`try_get`](Self::try_get) to probe without panicking.
///
/// # Growth
///
/// When an insertion finds `len == capacity` the buffer grows to
/// [`ArrayConfig::next_capacity`]. A failed growth leaves the array exactly
/// as it was and returns the error; the value being inserted is dropped.
///
/// ```
/// use strata_array::DynamicArray;
///
/// let mut arr = DynamicArray::new();
/// arr.insert(10).unwrap();
/// arr.insert(20).unwrap();
/// arr.insert(30).unwrap();
/// arr.insert_at(0, 5).unwrap();
/// assert_eq!(arr.remove_at(2), 20);
/// assert_eq!(arr, [5, 10, 30]);
/// ```
pub struct DynamicArray<T> {
    buf: RawBuffer<T>,
    len: usize,
    generation: Generation,
    instance: ArrayInstanceId,
    config: ArrayConfig,
    metrics: ArrayMetrics,
}

impl<T> DynamicArray<T> {
    /// Create an empty array with the default capacity of
    /// [`ArrayConfig::DEFAULT_INITIAL_CAPACITY`] elements.
    ///
    /// Allocation failure is fatal here, as with `Vec::with_capacity`. Use
    /// [`with_capacity`](Self::with_capacity) or
    /// [`with_config`](Self::with_config) to receive it as an error.
    pub fn new() -> Self {
        match Self::with_config(ArrayConfig::new()) {
            Ok(array) => array,
            Err(err) => raw::alloc_failure::<T>(err),
        }
    }

    /// Create an empty array with room for `capacity` elements.
    ///
    /// A capacity of zero performs no allocation.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        Self::with_config(ArrayConfig::new().with_initial_capacity(capacity))
    }

    /// Create an empty array from a validated config.
    pub fn with_config(config: ArrayConfig) -> Result<Self, ArrayError> {
        config.validate()?;
        let buf = RawBuffer::allocate(config.initial_capacity)?;
        Ok(Self::from_parts(buf, config))
    }

    fn from_parts(buf: RawBuffer<T>, config: ArrayConfig) -> Self {
        let metrics = ArrayMetrics {
            peak_capacity: buf.capacity(),
            ..ArrayMetrics::default()
        };
        Self {
            buf,
            len: 0,
            generation: Generation::INITIAL,
            instance: ArrayInstanceId::next(),
            config,
            metrics,
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of live elements. Alias for [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of element slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Current structural version.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Identity of this container, as recorded by its cursors.
    pub fn instance_id(&self) -> ArrayInstanceId {
        self.instance
    }

    /// The configuration this array was built with.
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// Cumulative counters for this array.
    pub fn metrics(&self) -> &ArrayMetrics {
        &self.metrics
    }

    /// Zero the counters, keeping `peak_capacity` at the current capacity.
    pub fn reset_metrics(&mut self) {
        self.metrics = ArrayMetrics {
            peak_capacity: self.capacity(),
            ..ArrayMetrics::default()
        };
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialised and the pointer is
        // non-null and aligned (dangling only when len == 0 or T is a ZST).
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Borrowing iterator over the live elements, front to back.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Mutably borrowing iterator over the live elements, front to back.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    // ── Indexed access ──────────────────────────────────────────

    /// Reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn get(&self, index: usize) -> &T {
        self.check_index(index);
        &self.as_slice()[index]
    }

    /// Mutable reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.check_index(index);
        &mut self.as_mut_slice()[index]
    }

    /// Reference to the element at `index`, or `None` if out of range.
    pub fn try_get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable reference to the element at `index`, or `None` if out of range.
    pub fn try_get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    #[track_caller]
    fn check_index(&self, index: usize) {
        assert!(
            index < self.len,
            "index out of range: the len is {} but the index is {index}",
            self.len
        );
    }

    // ── Insertion ───────────────────────────────────────────────

    /// Append `value`, returning the index it now occupies.
    ///
    /// Equivalent to `insert_at(len, value)`.
    pub fn insert(&mut self, value: T) -> Result<usize, ArrayError> {
        self.insert_at(self.len, value)
    }

    /// Insert `value` so that it becomes the element at `index`, shifting
    /// `[index, len)` one slot to the right. Returns `index`.
    ///
    /// Grows the buffer first if it is full. On growth failure `value` is
    /// dropped and the array is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[track_caller]
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<usize, ArrayError> {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );
        if self.len == self.buf.capacity() {
            self.grow()?;
        }
        // SAFETY: len < capacity, so slot `len` exists and is free. Walking
        // from the back, each read empties slot `i - 1` just before the
        // next iteration (or the final write) fills it again.
        unsafe {
            let mut i = self.len;
            while i > index {
                let moved = ptr::read(self.buf.slot(i - 1));
                ptr::write(self.buf.slot(i), moved);
                i -= 1;
            }
            ptr::write(self.buf.slot(index), value);
        }
        self.len += 1;
        self.metrics.inserts += 1;
        self.bump_generation();
        Ok(index)
    }

    // ── Removal ─────────────────────────────────────────────────

    /// Remove and return the element at `index`, shifting `(index, len)`
    /// one slot to the left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn remove_at(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "removal index (is {index}) should be < len (is {})",
            self.len
        );
        // SAFETY: `index < len`, so every slot read below is live. Walking
        // from the front, each read empties slot `i`, which the next
        // iteration refills; slot `len - 1` ends up vacated.
        let removed = unsafe {
            let removed = ptr::read(self.buf.slot(index));
            for i in index + 1..self.len {
                let moved = ptr::read(self.buf.slot(i));
                ptr::write(self.buf.slot(i - 1), moved);
            }
            removed
        };
        self.len -= 1;
        self.metrics.removals += 1;
        self.bump_generation();
        removed
    }

    /// Remove and return the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            Some(self.remove_at(self.len - 1))
        }
    }

    /// Drop every live element in index order, keeping the buffer.
    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        let live = self.len;
        // Forget the elements before dropping them so a panicking drop
        // cannot lead to a second drop from `Drop for DynamicArray`.
        self.len = 0;
        self.metrics.removals += live as u64;
        self.bump_generation();
        // SAFETY: the first `live` slots were initialised and are no longer
        // reachable through `self`.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.as_ptr(), live));
        }
    }

    // ── Growth ──────────────────────────────────────────────────

    /// Make room for at least `additional` more elements.
    ///
    /// Performs at most one reallocation, to the larger of `len + additional`
    /// and the next growth step.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ArrayError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        if required <= self.capacity() {
            return Ok(());
        }
        if let Some(max) = self.config.max_capacity {
            if required > max {
                return Err(ArrayError::CapacityExceeded {
                    requested: required,
                    max,
                });
            }
        }
        let new_capacity = match self.config.next_capacity(self.capacity()) {
            Ok(grown) => grown.max(required),
            Err(_) => required,
        };
        self.relocate(new_capacity)
    }

    fn grow(&mut self) -> Result<(), ArrayError> {
        let new_capacity = self.config.next_capacity(self.capacity())?;
        self.relocate(new_capacity)
    }

    /// Move every live element into a fresh buffer of `new_capacity` slots.
    ///
    /// The new buffer is obtained before anything is touched, so on error
    /// the array is exactly as it was.
    fn relocate(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        debug_assert!(new_capacity >= self.len);
        let fresh = RawBuffer::allocate(new_capacity)?;
        // SAFETY: the first `len` slots of the old buffer are live and the
        // new buffer has at least `len` slots. Each old slot is read once;
        // afterwards the old buffer holds no live values and is only freed.
        unsafe {
            for i in 0..self.len {
                let moved = ptr::read(self.buf.slot(i));
                ptr::write(fresh.slot(i), moved);
            }
        }
        let old_capacity = mem::replace(&mut self.buf, fresh).capacity();
        self.metrics.grow_events += 1;
        self.metrics.relocated_elements += self.len as u64;
        self.metrics.peak_capacity = self.metrics.peak_capacity.max(new_capacity);
        self.bump_generation();
        tracing::debug!(
            array = %self.instance,
            old_capacity,
            new_capacity,
            len = self.len,
            "array buffer grown"
        );
        Ok(())
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.next();
    }

    // ── Move semantics ──────────────────────────────────────────

    /// Move the contents out, leaving `self` empty with zero capacity.
    ///
    /// The returned array keeps this array's identity and generation, so
    /// cursors created before the move stay valid against it. `self` gets a
    /// fresh identity; its old cursors are rejected as foreign.
    #[must_use = "dropping the result drops every element"]
    pub fn take(&mut self) -> Self {
        let taken = Self {
            buf: mem::replace(&mut self.buf, RawBuffer::empty()),
            len: mem::replace(&mut self.len, 0),
            generation: self.generation,
            instance: mem::replace(&mut self.instance, ArrayInstanceId::next()),
            config: self.config.clone(),
            metrics: mem::take(&mut self.metrics),
        };
        self.bump_generation();
        taken
    }

    /// Move assignment: drop this array's elements and take over `source`'s
    /// buffer, leaving `source` empty.
    pub fn assign_take(&mut self, source: &mut Self) {
        *self = source.take();
    }

    // ── Cursors ─────────────────────────────────────────────────

    /// Forward cursor that can overwrite elements, starting at index 0.
    pub fn cursor(&self) -> ForwardCursor {
        ForwardCursor::new(self.instance, self.generation, self.len)
    }

    /// Read-only forward cursor, starting at index 0.
    pub fn const_cursor(&self) -> ForwardConstCursor {
        ForwardConstCursor::new(self.instance, self.generation, self.len)
    }

    /// Reverse cursor that can overwrite elements, starting at the last element.
    pub fn reverse_cursor(&self) -> ReverseCursor {
        ReverseCursor::new(self.instance, self.generation, self.len)
    }

    /// Read-only reverse cursor, starting at the last element.
    pub fn reverse_const_cursor(&self) -> ReverseConstCursor {
        ReverseConstCursor::new(self.instance, self.generation, self.len)
    }

    // ── Copy construction ───────────────────────────────────────

    /// Copy the array using `copy` for each element, in index order.
    ///
    /// The copy gets a buffer of this array's capacity, the same config, a
    /// fresh identity and fresh metrics. If an element copy fails or
    /// panics, the elements copied so far are dropped and the buffer freed
    /// before the failure propagates.
    pub fn try_clone_with<E, F>(&self, mut copy: F) -> Result<Self, CloneError<E>>
    where
        F: FnMut(&T) -> Result<T, E>,
    {
        let buf = RawBuffer::allocate(self.capacity()).map_err(CloneError::Alloc)?;
        // `out` owns the partial copy: its Drop tears down whatever was
        // written if `copy` returns early or unwinds.
        let mut out = Self::from_parts(buf, self.config.clone());
        for item in self.iter() {
            let value = copy(item).map_err(CloneError::Element)?;
            // SAFETY: out.len < self.len <= out.capacity, and slot
            // `out.len` has not been written yet.
            unsafe { ptr::write(out.buf.slot(out.len), value) };
            out.len += 1;
        }
        Ok(out)
    }
}

impl<T: Clone> DynamicArray<T> {
    /// Copy the array, reporting allocation failure as an error.
    pub fn try_clone(&self) -> Result<Self, ArrayError> {
        self.try_clone_with(|item| Ok::<T, Infallible>(item.clone()))
            .map_err(|err| match err {
                CloneError::Alloc(err) => err,
                CloneError::Element(never) => match never {},
            })
    }

    /// Copy assignment: replace this array's contents with a copy of
    /// `source`.
    ///
    /// `self` keeps its identity; its generation advances, so its existing
    /// cursors go stale. On failure `self` is unchanged.
    pub fn assign_from(&mut self, source: &Self) -> Result<(), ArrayError> {
        let mut copy = source.try_clone()?;
        copy.instance = self.instance;
        copy.generation = self.generation.next();
        *self = copy;
        Ok(())
    }

    /// Build an array holding copies of `items`, with capacity `items.len()`.
    pub fn from_slice(items: &[T]) -> Result<Self, ArrayError> {
        let mut out = Self::with_capacity(items.len())?;
        for item in items {
            out.insert(item.clone())?;
        }
        Ok(out)
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: the first `len` slots are live and dropped exactly once
        // here, in index order; `buf` frees the memory afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.as_ptr(), self.len));
        }
    }
}

impl<T> Default for DynamicArray<T> {
    /// An empty array with zero capacity. Does not allocate.
    fn default() -> Self {
        Self::from_parts(RawBuffer::empty(), ArrayConfig::new().with_initial_capacity(0))
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => raw::alloc_failure::<T>(err),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.assign_from(source) {
            raw::alloc_failure::<T>(err)
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: PartialEq> PartialEq<[T]> for DynamicArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynamicArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for DynamicArray<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.get(index)
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index)
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone> TryFrom<&[T]> for DynamicArray<T> {
    type Error = ArrayError;

    fn try_from(items: &[T]) -> Result<Self, ArrayError> {
        Self::from_slice(items)
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
