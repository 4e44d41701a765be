use super::Optimizer;
use crate::{Result, Scalar, optimization::const_step_update_momentum};

#[derive(Debug)]
pub struct GradientDescentWithMomentum<T> {
    learning_rate: T,
    momentum: T,
    velocity: Box<[T]>,
}

impl<T: Scalar> GradientDescentWithMomentum<T> {
    /// Creates a new `GradientDescentWithMomentum` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `momentum` - The decay of the velocity, in `[0, 1)`.
    ///
    /// # Returns
    /// A new `GradientDescentWithMomentum` instance.
    pub fn new(len: usize, learning_rate: T, momentum: T) -> Self {
        Self {
            learning_rate,
            momentum,
            velocity: vec![T::zero(); len].into_boxed_slice(),
        }
    }

    /// Returns the current velocity of every parameter.
    pub fn velocity(&self) -> &[T] {
        &self.velocity
    }
}

impl<T: Scalar> Optimizer<T> for GradientDescentWithMomentum<T> {
    fn update_params(&mut self, grad: &[T], params: &mut [T]) -> Result<()> {
        const_step_update_momentum(
            params,
            grad,
            &mut self.velocity,
            self.momentum,
            self.learning_rate,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_persists_between_updates() {
        let mut optimizer = GradientDescentWithMomentum::new(1, 1.0f64, 0.5);
        let mut params = [0.];

        optimizer.update_params(&[1.], &mut params).unwrap();
        optimizer.update_params(&[1.], &mut params).unwrap();

        assert_eq!(optimizer.velocity(), &[0.75]);
        assert_eq!(params, [-1.25]);
    }

    #[test]
    fn velocity_must_match_params() {
        let mut optimizer = GradientDescentWithMomentum::new(3, 1.0f64, 0.5);
        let mut params = [0.; 2];

        assert!(optimizer.update_params(&[1., 1.], &mut params).is_err());
        assert_eq!(optimizer.velocity(), &[0.; 3]);
    }
}
