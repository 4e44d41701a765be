use ndarray::{ArrayD, IxDyn};

use crate::{OptErr, Result, Scalar, error::check_len};

/// A buffer of elements resident in a `Device`'s memory.
///
/// The host never reads or writes the elements directly, they travel through
/// `Device::upload` and `DeviceBuffer::download`. The dimensions are kept only to restore
/// the shape when downloading, kernels always see the flat elements.
#[derive(Debug, Clone)]
pub struct DeviceBuffer<T> {
    pub(super) device: usize,
    pub(super) data: Box<[T]>,
    dims: Box<[usize]>,
}

impl<T: Scalar> DeviceBuffer<T> {
    pub(super) fn new(device: usize, data: Box<[T]>, dims: Box<[usize]>) -> Self {
        Self { device, data, dims }
    }

    /// Returns the amount of elements in the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the dimensions the buffer was created with.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Copies the buffer's elements into a host buffer.
    ///
    /// # Arguments
    /// * `out` - A mutable slice where the elements will be copied.
    ///
    /// # Returns
    /// A `SizeMismatch` error if `out` isn't the same size as this buffer.
    pub fn download(&self, out: &mut [T]) -> Result<()> {
        check_len(self.data.len(), out.len())?;
        out.copy_from_slice(&self.data);
        Ok(())
    }

    /// Copies the buffer's elements into a new host vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.to_vec()
    }

    /// Copies the buffer's elements into a new host array with the buffer's dimensions.
    pub fn to_array(&self) -> Result<ArrayD<T>> {
        ArrayD::from_shape_vec(IxDyn(&self.dims), self.to_vec()).map_err(|_| {
            OptErr::SizeMismatch {
                expected: self.dims.iter().product(),
                got: self.data.len(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_checks_size() {
        let buffer = DeviceBuffer::new(0, vec![1.0f32, 2.].into_boxed_slice(), Box::new([2]));

        let mut out = [0.; 3];
        assert!(buffer.download(&mut out).is_err());

        let mut out = [0.; 2];
        buffer.download(&mut out).unwrap();
        assert_eq!(out, [1., 2.]);
    }

    #[test]
    fn to_array_restores_dims() {
        let data = vec![1.0f64, 2., 3., 4., 5., 6.].into_boxed_slice();
        let buffer = DeviceBuffer::new(0, data, Box::new([2, 3]));

        let array = buffer.to_array().unwrap();

        assert_eq!(array.shape(), &[2, 3]);
        assert_eq!(array[[1, 0]], 4.);
    }
}
