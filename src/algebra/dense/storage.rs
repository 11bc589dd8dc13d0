//! Backing buffers for dense matrices.
//!
//! A dense matrix is generic over its storage `S`.  The default storage
//! is a heap allocated `Vec<T>`.  [`AlignedVec`] provides a buffer whose
//! first element sits on a [`MATRIX_ALIGNMENT`] byte boundary, which allows
//! the compiler to emit aligned vector loads in the hot assembly loops.

use crate::algebra::ScalarT;
use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::marker::PhantomData;
use std::mem::{align_of, size_of};
use std::ptr::NonNull;

/// Byte alignment of [`AlignedVec`] buffers.
pub const MATRIX_ALIGNMENT: usize = 64;

/// Owned storage that can be allocated at a given length.
pub trait DenseStorage<T>: AsRef<[T]> + AsMut<[T]> {
    /// storage of length `len` with every entry set to `value`
    fn from_elem(value: T, len: usize) -> Self;
    /// storage holding a copy of `src`
    fn from_slice(src: &[T]) -> Self;
}

impl<T> DenseStorage<T> for Vec<T>
where
    T: ScalarT,
{
    fn from_elem(value: T, len: usize) -> Self {
        vec![value; len]
    }
    fn from_slice(src: &[T]) -> Self {
        src.to_vec()
    }
}

/// Fixed length buffer aligned to [`MATRIX_ALIGNMENT`] bytes.
pub struct AlignedVec<T> {
    ptr: NonNull<T>,
    len: usize,
    phantom: PhantomData<T>,
}

// SAFETY: AlignedVec uniquely owns its allocation, exactly like Vec<T>.
unsafe impl<T: Send> Send for AlignedVec<T> {}
unsafe impl<T: Sync> Sync for AlignedVec<T> {}

impl<T> AlignedVec<T> {
    fn layout(len: usize) -> Layout {
        let bytes = len
            .checked_mul(size_of::<T>())
            .unwrap_or_else(|| panic!("capacity overflow"));
        let align = usize::max(MATRIX_ALIGNMENT, align_of::<T>());
        match Layout::from_size_align(bytes, align) {
            Ok(layout) => layout,
            Err(_) => panic!("capacity overflow"),
        }
    }

    fn is_unallocated(len: usize) -> bool {
        len == 0 || size_of::<T>() == 0
    }

    /// number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// true if the buffer start is on a [`MATRIX_ALIGNMENT`] boundary
    pub fn is_aligned(&self) -> bool {
        Self::is_unallocated(self.len) || (self.ptr.as_ptr() as usize) % MATRIX_ALIGNMENT == 0
    }
}

impl<T> DenseStorage<T> for AlignedVec<T>
where
    T: ScalarT,
{
    fn from_elem(value: T, len: usize) -> Self {
        if Self::is_unallocated(len) {
            return Self {
                ptr: NonNull::dangling(),
                len,
                phantom: PhantomData,
            };
        }
        let layout = Self::layout(len);
        // SAFETY: layout has nonzero size, and every slot is written
        // before the buffer is exposed.
        let ptr = unsafe {
            let raw = alloc(layout) as *mut T;
            let ptr = NonNull::new(raw).unwrap_or_else(|| handle_alloc_error(layout));
            for i in 0..len {
                ptr.as_ptr().add(i).write(value);
            }
            ptr
        };
        Self {
            ptr,
            len,
            phantom: PhantomData,
        }
    }

    fn from_slice(src: &[T]) -> Self {
        let mut out = Self::from_elem(T::zero(), src.len());
        out.as_mut().copy_from_slice(src);
        out
    }
}

impl<T> Drop for AlignedVec<T> {
    fn drop(&mut self) {
        if Self::is_unallocated(self.len) {
            return;
        }
        // SAFETY: allocated in from_elem with this exact layout.  Elements
        // are ScalarT (Copy) and need no drop of their own.
        unsafe { dealloc(self.ptr.as_ptr() as *mut u8, Self::layout(self.len)) }
    }
}

impl<T> AsRef<[T]> for AlignedVec<T> {
    fn as_ref(&self) -> &[T] {
        // SAFETY: ptr is valid for len initialized elements (or dangling with len 0)
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> AsMut<[T]> for AlignedVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        // SAFETY: as above, and &mut self guarantees uniqueness
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: ScalarT> Clone for AlignedVec<T> {
    fn clone(&self) -> Self {
        Self::from_slice(self.as_ref())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for AlignedVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_ref().iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for AlignedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_ref() == other.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn test_aligned_alloc() {
        let v = AlignedVec::<f64>::from_elem(1.5, 37);
        assert_eq!(v.len(), 37);
        assert!(v.is_aligned());
        assert!(v.as_ref().iter().all(|&x| x == 1.5));

        let c = AlignedVec::<Complex<f64>>::from_elem(Complex::new(0.0, 1.0), 5);
        assert!(c.is_aligned());
        assert_eq!(c.as_ref()[4], Complex::new(0.0, 1.0));
    }

    #[test]
    fn test_aligned_empty_and_clone() {
        let v = AlignedVec::<f32>::from_elem(0.0, 0);
        assert!(v.is_empty());
        assert!(v.as_ref().is_empty());

        let mut w = AlignedVec::<f64>::from_slice(&[1., 2., 3.]);
        let z = w.clone();
        w.as_mut()[0] = -1.;
        assert_eq!(z.as_ref(), &[1., 2., 3.]);
        assert_eq!(w.as_ref(), &[-1., 2., 3.]);
        assert_ne!(w, z);
    }
}
