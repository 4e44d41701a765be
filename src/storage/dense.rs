use ndarray::{ArrayBase, Data, DataMut, Dimension};

use super::{Container, ContainerMut, Elements, ElementsMut};
use crate::{OptErr, Result, Scalar};

impl<T: Scalar> Elements<T> for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, idx: usize) -> T {
        self[idx]
    }

    fn for_each_active<F: FnMut(usize, T)>(&self, mut f: F) {
        self.iter().enumerate().for_each(|(i, &x)| f(i, x));
    }
}

impl<T: Scalar> ElementsMut<T> for [T] {
    fn get_mut(&mut self, idx: usize) -> &mut T {
        &mut self[idx]
    }

    fn for_each_active_mut<F: FnMut(usize, &mut T)>(&mut self, mut f: F) {
        self.iter_mut().enumerate().for_each(|(i, x)| f(i, x));
    }
}

impl<T: Scalar> Container<T> for [T] {
    type View<'a>
        = &'a [T]
    where
        Self: 'a;

    fn flat(&self) -> Result<Self::View<'_>> {
        Ok(self)
    }
}

impl<T: Scalar> ContainerMut<T> for [T] {
    type ViewMut<'a>
        = &'a mut [T]
    where
        Self: 'a;

    fn flat_mut(&mut self) -> Result<Self::ViewMut<'_>> {
        Ok(self)
    }
}

impl<T: Scalar> Container<T> for Vec<T> {
    type View<'a>
        = &'a [T]
    where
        Self: 'a;

    fn flat(&self) -> Result<Self::View<'_>> {
        Ok(self.as_slice())
    }
}

impl<T: Scalar> ContainerMut<T> for Vec<T> {
    type ViewMut<'a>
        = &'a mut [T]
    where
        Self: 'a;

    fn flat_mut(&mut self) -> Result<Self::ViewMut<'_>> {
        Ok(self.as_mut_slice())
    }
}

impl<T: Scalar> Container<T> for Box<[T]> {
    type View<'a>
        = &'a [T]
    where
        Self: 'a;

    fn flat(&self) -> Result<Self::View<'_>> {
        Ok(self)
    }
}

impl<T: Scalar> ContainerMut<T> for Box<[T]> {
    type ViewMut<'a>
        = &'a mut [T]
    where
        Self: 'a;

    fn flat_mut(&mut self) -> Result<Self::ViewMut<'_>> {
        Ok(self)
    }
}

impl<T: Scalar, const N: usize> Container<T> for [T; N] {
    type View<'a>
        = &'a [T]
    where
        Self: 'a;

    fn flat(&self) -> Result<Self::View<'_>> {
        Ok(self.as_slice())
    }
}

impl<T: Scalar, const N: usize> ContainerMut<T> for [T; N] {
    type ViewMut<'a>
        = &'a mut [T]
    where
        Self: 'a;

    fn flat_mut(&mut self) -> Result<Self::ViewMut<'_>> {
        Ok(self.as_mut_slice())
    }
}

// Matrices and tensors are updated as the vector of their elements in logical order,
// which is only possible without a copy when the array is in standard layout.
impl<T, S, D> Container<T> for ArrayBase<S, D>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    type View<'a>
        = &'a [T]
    where
        Self: 'a;

    fn flat(&self) -> Result<Self::View<'_>> {
        self.as_slice().ok_or(OptErr::NonContiguous)
    }
}

impl<T, S, D> ContainerMut<T> for ArrayBase<S, D>
where
    T: Scalar,
    S: DataMut<Elem = T>,
    D: Dimension,
{
    type ViewMut<'a>
        = &'a mut [T]
    where
        Self: 'a;

    fn flat_mut(&mut self) -> Result<Self::ViewMut<'_>> {
        self.as_slice_mut().ok_or(OptErr::NonContiguous)
    }
}
