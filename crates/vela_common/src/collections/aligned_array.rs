use core::{
    fmt,
    marker::PhantomData,
    mem::{align_of, size_of},
    ops::{Deref, DerefMut, Index, IndexMut},
    ptr::{self, NonNull},
    slice::{self, SliceIndex},
};
use std::alloc::{handle_alloc_error, Layout};

use crate::alloc::{self, AllocError, UPLOAD_ALIGN};
use super::{DoubleOrMinReserveStrategy, ReserveStrategy};

/// Largest element alignment supported by [`AlignedArray`], a single page
pub const MAX_ELEMENT_ALIGN : usize = 4096;

static_assertions::const_assert!(UPLOAD_ALIGN.is_power_of_two());
static_assertions::const_assert!(UPLOAD_ALIGN <= MAX_ELEMENT_ALIGN);

/// A contiguous growable array, with its buffer aligned to at least [`UPLOAD_ALIGN`] bytes.
///
/// Rust containers already respect the alignment of their element type, but their buffer is only aligned to that.
/// An `AlignedArray` additionally guarantees a cache-line aligned start, so the buffer can be handed to code that loads whole
/// cache lines or SIMD registers, independent of the element type, e.g. an array of `u8`s or `[f32; 3]`s used as an upload buffer.
///
/// Every element is aligned to `align_of::<T>()`, as the buffer alignment is the larger of the element alignment and [`UPLOAD_ALIGN`].
/// Element types aligned to more than [`MAX_ELEMENT_ALIGN`] are rejected when the type is instantiated, as are zero-sized element types.
///
/// ```compile_fail
/// use vela_common::collections::AlignedArray;
///
/// #[repr(align(8192))]
/// struct HugePage([u8; 8192]);
///
/// let _arr = AlignedArray::<HugePage>::new();
/// ```
pub struct AlignedArray<T, R: ReserveStrategy = DoubleOrMinReserveStrategy> {
    ptr      : NonNull<T>,
    cap      : usize,
    len      : usize,
    _phantom : PhantomData<(T, R)>,
}

// SAFETY: `AlignedArray` owns its elements, like `Vec<T>`
unsafe impl<T: Send, R: ReserveStrategy> Send for AlignedArray<T, R> {}
// SAFETY: `AlignedArray` owns its elements, like `Vec<T>`
unsafe impl<T: Sync, R: ReserveStrategy> Sync for AlignedArray<T, R> {}

impl<T, R: ReserveStrategy> AlignedArray<T, R> {
    /// Alignment of the buffer
    pub const ALIGN : usize = if align_of::<T>() > UPLOAD_ALIGN { align_of::<T>() } else { UPLOAD_ALIGN };

    const VALID_ELEMENT : () = {
        assert!(size_of::<T>() != 0, "AlignedArray does not support zero-sized elements");
        assert!(align_of::<T>() <= MAX_ELEMENT_ALIGN, "AlignedArray does not support elements aligned to more than a page");
    };

    /// Create a new array, without allocating
    #[must_use]
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_ELEMENT;
        // SAFETY: `ALIGN` is never 0
        let ptr = unsafe { NonNull::new_unchecked(Self::ALIGN as *mut T) };
        Self { ptr, cap: 0, len: 0, _phantom: PhantomData }
    }

    /// Create a new array with space for at least `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows, and aborts when out of memory.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut arr = Self::new();
        arr.reserve_exact(capacity);
        arr
    }

    /// Create a new array with space for at least `capacity` elements, or return an error if the memory can't be allocated.
    pub fn try_with_capacity(capacity: usize) -> alloc::Result<Self> {
        let mut arr = Self::new();
        arr.try_grow_to(capacity)?;
        Ok(arr)
    }

    /// Create an array containing a clone of each element in `vals`
    pub fn from_slice(vals: &[T]) -> Self where
        T: Clone
    {
        let mut arr = Self::with_capacity(vals.len());
        arr.extend_from_slice(vals);
        arr
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the array can hold without reallocating
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Get a pointer to the buffer, the pointer is aligned to [`Self::ALIGN`], even when nothing is allocated
    #[inline]
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` elements are initialized, and the pointer is valid and aligned even when nothing is allocated
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: see `as_slice`
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Reserve space for at least `additional` more elements, using the reserve strategy.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows, and aborts when out of memory.
    pub fn reserve(&mut self, additional: usize) {
        handle_reserve(self.try_reserve(additional));
    }

    /// Reserve space for at least `additional` more elements, using the reserve strategy, or return an error if the memory can't be allocated.
    pub fn try_reserve(&mut self, additional: usize) -> alloc::Result<()> {
        let min_capacity = self.len.checked_add(additional).ok_or(AllocError::LayoutOverflow)?;
        if min_capacity <= self.cap {
            return Ok(());
        }
        let new_cap = R::calculate(self.cap, min_capacity).ok_or(AllocError::LayoutOverflow)?;
        self.try_grow_to(new_cap)
    }

    /// Reserve space for exactly `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows, and aborts when out of memory.
    pub fn reserve_exact(&mut self, additional: usize) {
        let res = self.len.checked_add(additional)
            .ok_or(AllocError::LayoutOverflow)
            .and_then(|min_capacity| self.try_grow_to(min_capacity));
        handle_reserve(res);
    }

    /// Append an element to the back of the array.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows, and aborts when out of memory.
    pub fn push(&mut self, val: T) {
        if self.len == self.cap {
            self.reserve(1);
        }
        // SAFETY: there is space for at least 1 more element
        unsafe { self.ptr.as_ptr().add(self.len).write(val) };
        self.len += 1;
    }

    /// Append an element to the back of the array, returning the element back if the memory can't be allocated
    pub fn try_push(&mut self, val: T) -> Result<(), (T, AllocError)> {
        if self.len == self.cap {
            if let Err(err) = self.try_reserve(1) {
                return Err((val, err));
            }
        }
        // SAFETY: there is space for at least 1 more element
        unsafe { self.ptr.as_ptr().add(self.len).write(val) };
        self.len += 1;
        Ok(())
    }

    /// Remove the last element and return it, or `None` if the array is empty
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the element was initialized and is no longer part of the array
        Some(unsafe { self.ptr.as_ptr().add(self.len).read() })
    }

    /// Shorten the array to `len` elements, dropping the rest. Does nothing if `len` is not smaller than the current length
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(
            // SAFETY: `len` is in bounds
            unsafe { self.ptr.as_ptr().add(len) },
            self.len - len
        );
        // The length is updated first, so a panicking `drop` cannot cause a double drop
        self.len = len;
        // SAFETY: the tail elements are initialized and no longer part of the array
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Remove all elements, keeping the allocation
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Clone and append all elements in `other`
    pub fn extend_from_slice(&mut self, other: &[T]) where
        T: Clone
    {
        self.reserve(other.len());

        let ptr = self.ptr;
        let len_slot = &mut self.len;
        // Keep the elements that were already written when `clone` panics
        let mut len = scopeguard::guard(*len_slot, |len| *len_slot = len);
        for val in other {
            // SAFETY: space was reserved for all elements in `other`
            unsafe { ptr.as_ptr().add(*len).write(val.clone()) };
            *len += 1;
        }
    }

    /// Resize the array to `new_len`, filling new slots with clones of `val`
    pub fn resize(&mut self, new_len: usize, val: T) where
        T: Clone
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len - self.len);
        while self.len < new_len {
            self.push(val.clone());
        }
    }

    fn try_grow_to(&mut self, capacity: usize) -> alloc::Result<()> {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_ELEMENT;
        if capacity <= self.cap {
            return Ok(());
        }

        let new_layout = alloc::array_layout::<T>(capacity, Self::ALIGN)?;
        let new_ptr = alloc::alloc_aligned(new_layout)?.cast::<T>();

        if self.cap != 0 {
            // SAFETY: the old buffer holds `len` initialized elements, the new buffer has space for at least that many and doesn't overlap
            unsafe {
                ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
                alloc::dealloc_aligned(self.ptr.cast(), self.current_layout());
            }
        }

        self.ptr = new_ptr;
        self.cap = capacity;
        Ok(())
    }

    fn current_layout(&self) -> Layout {
        // SAFETY: this layout was successfully created when the buffer was allocated
        unsafe { Layout::from_size_align_unchecked(self.cap * size_of::<T>(), Self::ALIGN) }
    }
}

fn handle_reserve(res: alloc::Result<()>) {
    match res {
        Ok(()) => {},
        Err(AllocError::LayoutOverflow) => panic!("capacity overflow"),
        Err(AllocError::OutOfMemory(layout)) => handle_alloc_error(layout),
    }
}

impl<T, R: ReserveStrategy> Drop for AlignedArray<T, R> {
    fn drop(&mut self) {
        self.clear();
        if self.cap != 0 {
            // SAFETY: the buffer was allocated with this layout
            unsafe { alloc::dealloc_aligned(self.ptr.cast(), self.current_layout()) };
        }
    }
}

impl<T, R: ReserveStrategy> Default for AlignedArray<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, R: ReserveStrategy> Clone for AlignedArray<T, R> {
    fn clone(&self) -> Self {
        let mut arr = Self::with_capacity(self.len);
        arr.extend_from_slice(self);
        arr
    }
}

impl<T, R: ReserveStrategy> Deref for AlignedArray<T, R> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, R: ReserveStrategy> DerefMut for AlignedArray<T, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>, R: ReserveStrategy> Index<I> for AlignedArray<T, R> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>, R: ReserveStrategy> IndexMut<I> for AlignedArray<T, R> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: fmt::Debug, R: ReserveStrategy> fmt::Debug for AlignedArray<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: PartialEq, R: ReserveStrategy> PartialEq for AlignedArray<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, R: ReserveStrategy> PartialEq<[T]> for AlignedArray<T, R> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, R: ReserveStrategy, const N: usize> PartialEq<[T; N]> for AlignedArray<T, R> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, R: ReserveStrategy> Extend<T> for AlignedArray<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for val in iter {
            self.push(val);
        }
    }
}

impl<T, R: ReserveStrategy> FromIterator<T> for AlignedArray<T, R> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<'a, T, R: ReserveStrategy> IntoIterator for &'a AlignedArray<T, R> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, R: ReserveStrategy> IntoIterator for &'a mut AlignedArray<T, R> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use crate::{alloc::is_aligned_to, collections::Pow2ReserveStrategy};
    use super::*;

    #[test]
    fn new_does_not_allocate() {
        let arr = AlignedArray::<u8>::new();
        assert_eq!(arr.capacity(), 0);
        assert!(arr.is_empty());
        assert!(is_aligned_to(arr.as_ptr(), UPLOAD_ALIGN));
        assert_eq!(arr.as_slice(), &[] as &[u8]);
    }

    #[test]
    fn push_pop() {
        let mut arr = AlignedArray::<u32>::new();
        for i in 0..100 {
            arr.push(i);
            assert!(is_aligned_to(arr.as_ptr(), UPLOAD_ALIGN));
        }
        assert_eq!(arr.len(), 100);
        assert!(arr.capacity() >= 100);
        assert_eq!(arr[42], 42);
        assert_eq!(arr.iter().sum::<u32>(), 4950);

        assert_eq!(arr.pop(), Some(99));
        arr[0] = 7;
        assert_eq!(&arr[..3], &[7, 1, 2]);

        arr.clear();
        assert_eq!(arr.pop(), None);
    }

    #[test]
    fn reserve_strategies() {
        let mut arr = AlignedArray::<u16>::with_capacity(3);
        assert_eq!(arr.capacity(), 3);
        arr.extend_from_slice(&[1, 2, 3]);
        arr.push(4);
        assert_eq!(arr.capacity(), 6);

        let mut arr = AlignedArray::<u16, Pow2ReserveStrategy>::new();
        arr.extend([1, 2, 3, 4, 5]);
        assert_eq!(arr.capacity(), 8);
        assert_eq!(arr, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn over_aligned_elements() {
        #[repr(align(128))]
        #[derive(Clone, Copy, PartialEq, Debug)]
        struct Big(u32);

        assert_eq!(AlignedArray::<Big>::ALIGN, 128);
        let arr : AlignedArray<Big> = (0..10).map(Big).collect();
        for elem in &arr {
            assert!(is_aligned_to(elem as *const Big, 128));
        }
        assert_eq!(arr[9], Big(9));
    }

    #[test]
    fn page_aligned_elements() {
        #[repr(align(4096))]
        #[derive(Clone, Copy, PartialEq, Debug)]
        struct Page(u8);

        assert_eq!(align_of::<Page>(), MAX_ELEMENT_ALIGN);
        assert_eq!(AlignedArray::<Page>::ALIGN, MAX_ELEMENT_ALIGN);
        assert_eq!(AlignedArray::<u8>::ALIGN, UPLOAD_ALIGN);

        let mut arr = AlignedArray::<Page>::new();
        arr.extend([Page(1), Page(2), Page(3)]);
        for elem in &arr {
            assert!(is_aligned_to(elem as *const Page, MAX_ELEMENT_ALIGN));
        }
        assert_eq!(arr.pop(), Some(Page(3)));
        assert_eq!(arr, [Page(1), Page(2)]);
    }

    #[test]
    fn clone_and_compare() {
        let arr = AlignedArray::<String>::from_slice(&["a".to_string(), "b".to_string()]);
        let copy = arr.clone();
        assert_eq!(arr, copy);
        assert!(is_aligned_to(copy.as_ptr(), UPLOAD_ALIGN));
        assert_eq!(format!("{copy:?}"), "[\"a\", \"b\"]");
    }

    #[test]
    fn resize_and_truncate() {
        let mut arr = AlignedArray::<f32>::new();
        arr.resize(4, 1.5);
        assert_eq!(arr, [1.5; 4]);
        arr.truncate(2);
        assert_eq!(arr, [1.5, 1.5]);
        arr.truncate(10);
        assert_eq!(arr.len(), 2);
        for val in &mut arr {
            *val = 2.0;
        }
        assert_eq!(arr, [2.0, 2.0]);
    }

    #[test]
    fn drops_elements() {
        #[derive(Clone)]
        struct Counted(Rc<Cell<usize>>);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut arr = AlignedArray::<Counted>::new();
        for _ in 0..5 {
            arr.push(Counted(drops.clone()));
        }
        drop(arr.pop());
        assert_eq!(drops.get(), 1);
        arr.truncate(3);
        assert_eq!(drops.get(), 2);
        drop(arr);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn capacity_overflow_is_reported() {
        let mut arr = AlignedArray::<u64>::new();
        assert_eq!(arr.try_reserve(usize::MAX), Err(AllocError::LayoutOverflow));
        assert!(AlignedArray::<u64>::try_with_capacity(usize::MAX / 2).is_err());
        assert_eq!(arr.capacity(), 0);
        assert_eq!(arr.try_push(3), Ok(()));
        assert_eq!(arr[0], 3);
    }
}
