use std::collections::{BTreeMap, btree_map::Entry};

use super::{Container, ContainerMut, Elements, ElementsMut};
use crate::{OptErr, Result, Scalar};

/// A vector of logical dimension `dim` that only stores some of its entries.
///
/// Indices that aren't stored are implicitly zero. Entries are kept ordered by index so that
/// every traversal, and thus every floating point reduction over it, is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector<T> {
    dim: usize,
    entries: BTreeMap<usize, T>,
}

impl<T: Scalar> SparseVector<T> {
    /// Creates a new empty `SparseVector`.
    ///
    /// # Arguments
    /// * `dim` - The logical dimension of the vector.
    ///
    /// # Returns
    /// A new `SparseVector` instance where every entry is zero.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            entries: BTreeMap::new(),
        }
    }

    /// Creates a new `SparseVector` from a list of `(index, value)` pairs.
    ///
    /// # Arguments
    /// * `dim` - The logical dimension of the vector.
    /// * `entries` - The stored entries.
    ///
    /// # Returns
    /// A new `SparseVector` or an error if an index is repeated or out of the vector's domain.
    pub fn from_entries<I>(dim: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        let mut sparse = Self::new(dim);

        for (index, value) in entries {
            sparse.check_domain(index)?;

            match sparse.entries.entry(index) {
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
                Entry::Occupied(_) => return Err(OptErr::DuplicateIndex { index }),
            }
        }

        Ok(sparse)
    }

    /// Creates a new `SparseVector` storing the nonzero values of `dense`.
    pub fn from_dense(dense: &[T]) -> Self {
        let entries = dense
            .iter()
            .enumerate()
            .filter(|(_, x)| !x.is_zero())
            .map(|(i, &x)| (i, x))
            .collect();

        Self {
            dim: dense.len(),
            entries,
        }
    }

    /// Expands the vector into a dense one.
    pub fn to_dense(&self) -> Vec<T> {
        let mut dense = vec![T::zero(); self.dim];
        self.entries.iter().for_each(|(&i, &x)| dense[i] = x);
        dense
    }

    /// Returns the logical dimension of the vector.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the amount of stored entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether `index` is stored.
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Reads the value at `index`, zero if it isn't stored.
    pub fn value(&self, index: usize) -> T {
        self.entries.get(&index).copied().unwrap_or_else(T::zero)
    }

    /// Stores `value` at `index`.
    ///
    /// # Arguments
    /// * `index` - The position to write.
    /// * `value` - The value to store, zeros are stored as well.
    ///
    /// # Returns
    /// The previously stored value or an error if `index` is out of the vector's domain.
    pub fn insert(&mut self, index: usize, value: T) -> Result<Option<T>> {
        self.check_domain(index)?;
        Ok(self.entries.insert(index, value))
    }

    /// Iterates over the stored entries in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.entries.iter().map(|(&i, &x)| (i, x))
    }

    fn check_domain(&self, index: usize) -> Result<()> {
        if index >= self.dim {
            return Err(OptErr::OutOfDomain {
                index,
                dim: self.dim,
            });
        }

        Ok(())
    }
}

impl<T: Scalar> Elements<T> for SparseVector<T> {
    fn len(&self) -> usize {
        self.dim
    }

    fn get(&self, idx: usize) -> T {
        self.value(idx)
    }

    fn for_each_active<F: FnMut(usize, T)>(&self, mut f: F) {
        self.entries.iter().for_each(|(&i, &x)| f(i, x));
    }
}

impl<T: Scalar> ElementsMut<T> for SparseVector<T> {
    fn get_mut(&mut self, idx: usize) -> &mut T {
        debug_assert!(idx < self.dim, "sparse index {idx} out of domain");
        self.entries.entry(idx).or_insert_with(T::zero)
    }

    fn for_each_active_mut<F: FnMut(usize, &mut T)>(&mut self, mut f: F) {
        self.entries.iter_mut().for_each(|(&i, x)| f(i, x));
    }
}

impl<T: Scalar> Container<T> for SparseVector<T> {
    type View<'a>
        = &'a SparseVector<T>
    where
        Self: 'a;

    fn flat(&self) -> Result<Self::View<'_>> {
        Ok(self)
    }
}

impl<T: Scalar> ContainerMut<T> for SparseVector<T> {
    type ViewMut<'a>
        = &'a mut SparseVector<T>
    where
        Self: 'a;

    fn flat_mut(&mut self) -> Result<Self::ViewMut<'_>> {
        Ok(self)
    }
}
