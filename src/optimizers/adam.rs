use super::Optimizer;
use crate::{Result, Scalar, optimization::adam_update};

#[derive(Debug)]
pub struct Adam<T> {
    learning_rate: T,
    beta1: T,
    beta2: T,
    m: Box<[T]>,
    v: Box<[T]>,
    time: u64,
}

impl<T: Scalar> Adam<T> {
    /// Creates a new `Adam` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `beta1`, `beta2` - The decays of the moment estimates, in `[0, 1)`.
    ///
    /// # Returns
    /// A new `Adam` instance.
    pub fn new(len: usize, learning_rate: T, beta1: T, beta2: T) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            m: vec![T::zero(); len].into_boxed_slice(),
            v: vec![T::zero(); len].into_boxed_slice(),
            time: 0,
        }
    }

    /// Returns the amount of updates applied so far.
    pub fn time(&self) -> u64 {
        self.time
    }
}

impl<T: Scalar> Optimizer<T> for Adam<T> {
    fn update_params(&mut self, grad: &[T], params: &mut [T]) -> Result<()> {
        let Self {
            learning_rate: lr,
            beta1: b1,
            beta2: b2,
            ..
        } = *self;

        adam_update(params, grad, &mut self.m, &mut self.v, &mut self.time, lr, b1, b2)
    }
}
