use crate::{Result, Scalar};

/// Defines the strategy for updating model parameters based on calculated gradients.
///
/// Unlike the free update rules, an `Optimizer` owns the accumulator state of the
/// parameters it updates, so it must always be called with the same parameters.
pub trait Optimizer<T: Scalar> {
    /// Updates the provided slice of parameters using the gradient.
    ///
    /// # Arguments
    /// * `grad` - A reference to the model's gradient.
    /// * `params` - The parameters to update.
    ///
    /// # Returns
    /// An error if there's a mismatch in the sizes of `grad`, `params` and the optimizer's state.
    fn update_params(&mut self, grad: &[T], params: &mut [T]) -> Result<()>;
}
