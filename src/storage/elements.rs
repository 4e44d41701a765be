use crate::{Result, Scalar};

/// Indexed access to a flat view of numeric elements.
///
/// This is the only capability the update rules rely on. The set of *active* indices is what
/// makes dense and sparse storage differ: every position for dense views, only the stored
/// entries for sparse ones. Reading an inactive index yields zero.
pub trait Elements<T: Scalar> {
    /// Returns the logical amount of elements.
    fn len(&self) -> usize;

    /// Returns whether the view holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the element at `idx`, zero if it isn't stored.
    ///
    /// # Arguments
    /// * `idx` - A flat index, must be lower than `len`.
    fn get(&self, idx: usize) -> T;

    /// Calls `f` with every active index and its value, in ascending index order.
    fn for_each_active<F: FnMut(usize, T)>(&self, f: F);
}

/// Mutable indexed access to a flat view of numeric elements.
pub trait ElementsMut<T: Scalar>: Elements<T> {
    /// Returns a mutable reference to the element at `idx`.
    ///
    /// Sparse views store a zero at `idx` first if it wasn't active.
    ///
    /// # Arguments
    /// * `idx` - A flat index, must be lower than `len`.
    fn get_mut(&mut self, idx: usize) -> &mut T;

    /// Calls `f` with every active index and a mutable reference to its value.
    fn for_each_active_mut<F: FnMut(usize, &mut T)>(&mut self, f: F);
}

/// A parameter, gradient or state container that can be seen as a flat vector.
///
/// Multi-dimensional containers flatten over their own backing storage, no copy is made.
pub trait Container<T: Scalar> {
    type View<'a>: Elements<T>
    where
        Self: 'a;

    /// Borrows the container as a flat view.
    ///
    /// # Returns
    /// The flat view or an error if the storage can't be flattened in place.
    fn flat(&self) -> Result<Self::View<'_>>;
}

/// A container that can be mutated through a flat view.
pub trait ContainerMut<T: Scalar>: Container<T> {
    type ViewMut<'a>: ElementsMut<T>
    where
        Self: 'a;

    /// Mutably borrows the container as a flat view.
    ///
    /// # Returns
    /// The flat view or an error if the storage can't be flattened in place.
    fn flat_mut(&mut self) -> Result<Self::ViewMut<'_>>;
}

impl<T: Scalar, E: Elements<T> + ?Sized> Elements<T> for &E {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, idx: usize) -> T {
        (**self).get(idx)
    }

    fn for_each_active<F: FnMut(usize, T)>(&self, f: F) {
        (**self).for_each_active(f)
    }
}

impl<T: Scalar, E: Elements<T> + ?Sized> Elements<T> for &mut E {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, idx: usize) -> T {
        (**self).get(idx)
    }

    fn for_each_active<F: FnMut(usize, T)>(&self, f: F) {
        (**self).for_each_active(f)
    }
}

impl<T: Scalar, E: ElementsMut<T> + ?Sized> ElementsMut<T> for &mut E {
    fn get_mut(&mut self, idx: usize) -> &mut T {
        (**self).get_mut(idx)
    }

    fn for_each_active_mut<F: FnMut(usize, &mut T)>(&mut self, f: F) {
        (**self).for_each_active_mut(f)
    }
}
