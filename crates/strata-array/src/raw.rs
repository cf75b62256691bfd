//! Low-level primitives for the container's backing storage.
//!
//! [`RawBuffer`] owns an uninitialised, capacity-sized block obtained from
//! the global allocator. It knows nothing about which slots are live: it
//! never reads, writes, or drops elements, it only allocates and frees.
//! Zero capacity and zero-sized element types never touch the allocator.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use strata_core::ArrayError;

/// Uninitialised storage for `capacity` values of `T`.
pub(crate) struct RawBuffer<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _owns: PhantomData<T>,
}

// SAFETY: RawBuffer uniquely owns its allocation; sending or sharing it is
// exactly as safe as sending or sharing the `T` values it may hold.
unsafe impl<T: Send> Send for RawBuffer<T> {}
// SAFETY: see above.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {
    /// A buffer with no storage.
    pub(crate) const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate room for `capacity` elements.
    pub(crate) fn allocate(capacity: usize) -> Result<Self, ArrayError> {
        if capacity == 0 || mem::size_of::<T>() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _owns: PhantomData,
            });
        }
        let layout = Self::layout(capacity)?;
        // SAFETY: `layout` has non-zero size: capacity > 0 and T is not
        // zero-sized, both checked above.
        let raw = unsafe { alloc::alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => Ok(Self {
                ptr,
                capacity,
                _owns: PhantomData,
            }),
            None => {
                tracing::warn!(
                    capacity,
                    bytes = layout.size(),
                    "allocator refused array buffer"
                );
                Err(ArrayError::AllocationFailed {
                    requested_bytes: layout.size(),
                })
            }
        }
    }

    /// Layout of a buffer holding `capacity` elements.
    fn layout(capacity: usize) -> Result<Layout, ArrayError> {
        Layout::array::<T>(capacity).map_err(|_| ArrayError::CapacityOverflow {
            requested: capacity,
        })
    }

    /// Number of element slots.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pointer to slot 0. Dangling (but aligned) when nothing was allocated.
    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index` must be `<= capacity`.
    pub(crate) unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity);
        // SAFETY: the caller keeps `index` within the allocation (or one
        // past its end), which is what `add` requires.
        unsafe { self.ptr.as_ptr().add(index) }
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if self.capacity == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        // The same layout was valid when the block was allocated.
        if let Ok(layout) = Self::layout(self.capacity) {
            // SAFETY: `ptr` was returned by `alloc` with this exact layout
            // and has not been freed; RawBuffer is its unique owner.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

/// Diverge on an allocation error raised by an infallible API
/// (`DynamicArray::new`, `Clone`), matching what `Vec` does.
pub(crate) fn alloc_failure<T>(err: ArrayError) -> ! {
    match err {
        ArrayError::AllocationFailed { requested_bytes } => {
            let layout = Layout::from_size_align(requested_bytes, mem::align_of::<T>())
                .unwrap_or_else(|_| Layout::new::<T>());
            alloc::handle_alloc_error(layout)
        }
        other => panic!("{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_does_not_allocate() {
        let buf = RawBuffer::<u64>::allocate(0).unwrap();
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.as_ptr(), NonNull::<u64>::dangling().as_ptr());
    }

    #[test]
    fn allocation_is_aligned() {
        let buf = RawBuffer::<u64>::allocate(16).unwrap();
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.as_ptr() as usize % mem::align_of::<u64>(), 0);
    }

    #[test]
    fn zero_sized_types_keep_requested_capacity() {
        let buf = RawBuffer::<()>::allocate(1_000).unwrap();
        assert_eq!(buf.capacity(), 1_000);
    }

    #[test]
    fn oversized_layout_is_capacity_overflow() {
        let result = RawBuffer::<u64>::allocate(usize::MAX / 4);
        assert!(matches!(
            result,
            Err(ArrayError::CapacityOverflow { .. })
        ));
    }

    #[test]
    fn slots_are_contiguous() {
        let buf = RawBuffer::<u32>::allocate(4).unwrap();
        // SAFETY: indices are within capacity.
        let (a, b) = unsafe { (buf.slot(0), buf.slot(3)) };
        assert_eq!(b as usize - a as usize, 3 * mem::size_of::<u32>());
    }
}
