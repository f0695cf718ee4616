//! Fixed-size heap storage shared by the graph, the DSU, and the driver.
//!
//! [`ParallelArray`] wraps a boxed slice with parallel bulk construction,
//! constant-time whole-array swap, and a scatter-write facility for phases
//! that fill disjoint indices from many workers at once.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use rayon::prelude::*;

/// Fixed-size, index-addressable storage with parallel construction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParallelArray<T> {
    data: Box<[T]>,
}

impl<T> ParallelArray<T> {
    /// Takes ownership of `values` as the array's storage.
    #[must_use]
    pub fn from_vec(values: Vec<T>) -> Self {
        Self {
            data: values.into_boxed_slice(),
        }
    }

    /// Returns the number of slots.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.data.len() }

    /// Returns `true` when the array has no slots.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Returns a view over all slots.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[T] { &self.data }

    /// Returns a mutable view over all slots.
    #[rustfmt::skip]
    pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.data }

    /// Iterates over the slots in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Exchanges storage with `other` in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.data, &mut other.data);
    }

    /// Returns a scatter-write handle that borrows the array mutably for
    /// the lifetime of the parallel section filling it.
    pub fn scatter(&mut self) -> ScatterWriter<'_, T> {
        ScatterWriter {
            ptr: self.data.as_mut_ptr(),
            len: self.data.len(),
            _array: PhantomData,
        }
    }
}

impl<T: Clone + Send> ParallelArray<T> {
    /// Allocates `len` slots, each initialised to `value`.
    #[must_use]
    pub fn filled(len: usize, value: T) -> Self {
        Self::from_vec(vec![value; len])
    }
}

impl<T: Send> ParallelArray<T> {
    /// Builds the array by evaluating `init` for every index in parallel.
    pub fn from_par_fn(len: usize, init: impl Fn(usize) -> T + Send + Sync) -> Self {
        Self::from_vec((0..len).into_par_iter().map(init).collect())
    }
}

impl<T: Sync> ParallelArray<T> {
    /// Parallel iteration over contiguous index ranges.
    pub fn par_iter(&self) -> rayon::slice::Iter<'_, T> {
        self.data.par_iter()
    }
}

impl<T> Index<usize> for ParallelArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for ParallelArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<'a, T> IntoIterator for &'a ParallelArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Write handle for filling disjoint indices of a [`ParallelArray`] from
/// multiple workers without locks.
///
/// The handle never reads; each index must have a single writer within the
/// parallel section that holds the handle, and readers must wait for that
/// section to complete.
pub struct ScatterWriter<'a, T> {
    ptr: *mut T,
    len: usize,
    _array: PhantomData<&'a mut [T]>,
}

// SAFETY: the handle is write-only and distinct indices are distinct
// memory locations; the disjoint-writer contract on `write` rules out
// overlapping access.
unsafe impl<T: Send> Send for ScatterWriter<'_, T> {}
unsafe impl<T: Send> Sync for ScatterWriter<'_, T> {}

impl<T: Copy> ScatterWriter<'_, T> {
    /// Stores `value` at `index`.
    ///
    /// # Safety
    ///
    /// No two concurrent calls may target the same `index`, and the slot
    /// must not be read until the enclosing parallel section has finished.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range.
    pub unsafe fn write(&self, index: usize, value: T) {
        assert!(
            index < self.len,
            "scatter index {index} out of range for array of length {}",
            self.len
        );
        // SAFETY: bounds checked above; the caller guarantees this index
        // has no other writer.
        unsafe { self.ptr.add(index).write(value) };
    }
}
