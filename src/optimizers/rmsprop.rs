use super::Optimizer;
use crate::{Result, Scalar, optimization::rmsprop_update};

#[derive(Debug)]
pub struct RmsProp<T> {
    learning_rate: T,
    decay: T,
    accum_sq_grad: Box<[T]>,
}

impl<T: Scalar> RmsProp<T> {
    /// Creates a new `RmsProp` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `decay` - The decay of the squared gradient average, in `[0, 1)`.
    ///
    /// # Returns
    /// A new `RmsProp` instance.
    pub fn new(len: usize, learning_rate: T, decay: T) -> Self {
        Self {
            learning_rate,
            decay,
            accum_sq_grad: vec![T::zero(); len].into_boxed_slice(),
        }
    }
}

impl<T: Scalar> Optimizer<T> for RmsProp<T> {
    fn update_params(&mut self, grad: &[T], params: &mut [T]) -> Result<()> {
        rmsprop_update(
            params,
            grad,
            &mut self.accum_sq_grad,
            self.decay,
            self.learning_rate,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_gradient_keeps_constant_step() {
        let mut optimizer = RmsProp::new(1, 0.5f64, 0.);
        let mut params = [0.];

        optimizer.update_params(&[2.], &mut params).unwrap();
        optimizer.update_params(&[2.], &mut params).unwrap();

        assert_eq!(params, [-1.]);
    }
}
