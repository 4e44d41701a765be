use super::Optimizer;
use crate::{Result, Scalar, optimization::adagrad_update};

#[derive(Debug)]
pub struct Adagrad<T> {
    learning_rate: T,
    accum_sq_grad: Box<[T]>,
}

impl<T: Scalar> Adagrad<T> {
    /// Creates a new `Adagrad` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    ///
    /// # Returns
    /// A new `Adagrad` instance.
    pub fn new(len: usize, learning_rate: T) -> Self {
        Self {
            learning_rate,
            accum_sq_grad: vec![T::zero(); len].into_boxed_slice(),
        }
    }
}

impl<T: Scalar> Optimizer<T> for Adagrad<T> {
    fn update_params(&mut self, grad: &[T], params: &mut [T]) -> Result<()> {
        adagrad_update(params, grad, &mut self.accum_sq_grad, self.learning_rate)
    }
}
