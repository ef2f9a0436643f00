//! Aligned allocation primitive.
//!
//! Memory is retrieved from rust's global allocator, these functions only add the alignment bookkeeping and turn failures into errors.

use std::{
    alloc::{self, Layout},
    ptr::NonNull,
};

use thiserror::Error;
use vela_logging::{log_error, LogCategory};

const LOG_CAT : LogCategory = LogCategory::new_with_sub("Common", "Alloc");

/// Alignment of buffers meant to be uploaded or loaded into SIMD registers, this covers a full cache line
pub const UPLOAD_ALIGN : usize = 64;

/// Allocation error
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum AllocError {
    /// The requested size overflows `isize::MAX` when rounded up to the alignment, or the alignment is not a power of 2
    #[error("invalid layout: size or alignment overflows")]
    LayoutOverflow,
    /// The allocator could not provide memory for the layout
    #[error("out of memory: failed to allocate {} bytes aligned to {} bytes", .0.size(), .0.align())]
    OutOfMemory(Layout),
}

/// Allocation result
pub type Result<T> = core::result::Result<T, AllocError>;

/// Create a layout for `size` bytes aligned to `align`
pub fn aligned_layout(size: usize, align: usize) -> Result<Layout> {
    Layout::from_size_align(size, align).map_err(|_| AllocError::LayoutOverflow)
}

/// Create a layout for `count` consecutive `T`s, with the start aligned to at least `min_align`
pub fn array_layout<T>(count: usize, min_align: usize) -> Result<Layout> {
    let size = core::mem::size_of::<T>().checked_mul(count).ok_or(AllocError::LayoutOverflow)?;
    aligned_layout(size, core::mem::align_of::<T>().max(min_align))
}

/// Allocate memory for the given layout.
///
/// A zero-sized layout does not allocate, but returns a dangling pointer that is aligned to the layout's alignment.
/// The memory is uninitialized.
pub fn alloc_aligned(layout: Layout) -> Result<NonNull<u8>> {
    if layout.size() == 0 {
        return Ok(dangling(layout));
    }

    // SAFETY: the layout has a non-zero size
    let ptr = unsafe { alloc::alloc(layout) };
    match NonNull::new(ptr) {
        Some(ptr) => Ok(ptr),
        None => {
            log_error!(LOG_CAT, "Failed to allocate {} bytes aligned to {} bytes", layout.size(), layout.align());
            Err(AllocError::OutOfMemory(layout))
        },
    }
}

/// Allocate zero-initialized memory for the given layout.
///
/// A zero-sized layout does not allocate, but returns a dangling pointer that is aligned to the layout's alignment.
pub fn alloc_aligned_zeroed(layout: Layout) -> Result<NonNull<u8>> {
    if layout.size() == 0 {
        return Ok(dangling(layout));
    }

    // SAFETY: the layout has a non-zero size
    let ptr = unsafe { alloc::alloc_zeroed(layout) };
    match NonNull::new(ptr) {
        Some(ptr) => Ok(ptr),
        None => {
            log_error!(LOG_CAT, "Failed to allocate {} zeroed bytes aligned to {} bytes", layout.size(), layout.align());
            Err(AllocError::OutOfMemory(layout))
        },
    }
}

/// Deallocate memory retrieved from [`alloc_aligned`] or [`alloc_aligned_zeroed`].
///
/// # Safety
///
/// `ptr` must have been returned by one of the allocation functions in this module, called with the same `layout`, and may not have been deallocated yet.
pub unsafe fn dealloc_aligned(ptr: NonNull<u8>, layout: Layout) {
    if layout.size() != 0 {
        alloc::dealloc(ptr.as_ptr(), layout);
    }
}

/// Check if a pointer is aligned to `align`, which needs to be a power of 2
#[inline]
pub fn is_aligned_to<T>(ptr: *const T, align: usize) -> bool {
    debug_assert!(align.is_power_of_two());
    (ptr as usize) & (align - 1) == 0
}

fn dangling(layout: Layout) -> NonNull<u8> {
    // SAFETY: the alignment of a layout is never 0
    unsafe { NonNull::new_unchecked(layout.align() as *mut u8) }
}
