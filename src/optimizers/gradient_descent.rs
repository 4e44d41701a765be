use super::Optimizer;
use crate::{Result, Scalar, optimization::const_step_update};

#[derive(Debug)]
pub struct GradientDescent<T> {
    learning_rate: T,
}

impl<T: Scalar> GradientDescent<T> {
    /// Creates a new `GradientDescent` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    ///
    /// # Returns
    /// A new `GradientDescent` instance.
    pub fn new(learning_rate: T) -> Self {
        Self { learning_rate }
    }
}

impl<T: Scalar> Optimizer<T> for GradientDescent<T> {
    fn update_params(&mut self, grad: &[T], params: &mut [T]) -> Result<()> {
        const_step_update(params, grad, self.learning_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OptErr;

    #[test]
    fn steps_against_gradient() {
        let mut optimizer = GradientDescent::new(0.5f32);
        let mut params = [1., 1.];

        optimizer.update_params(&[2., -2.], &mut params).unwrap();

        assert_eq!(params, [0., 2.]);
    }

    #[test]
    fn rejects_size_mismatch() {
        let mut optimizer = GradientDescent::new(0.5f32);
        let mut params = [1., 1.];

        let err = optimizer.update_params(&[2.], &mut params).unwrap_err();

        assert_eq!(err, OptErr::SizeMismatch { expected: 2, got: 1 });
    }
}
