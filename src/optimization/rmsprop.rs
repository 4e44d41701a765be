use super::formula;
use crate::{
    Result, Scalar,
    error::check_len,
    storage::{Container, ContainerMut, Elements, ElementsMut},
};

/// RMSProp: like Adagrad but the squared gradients are averaged with an exponential decay.
///
/// First `accum_sq_grad[i] = decay * accum_sq_grad[i] + (1 - decay) * grad[i]^2` for every
/// active index of `grad`, then `theta[i] -= step_size / sqrt(accum_sq_grad[i]) * grad[i]`
/// wherever the accumulator is positive.
///
/// # Arguments
/// * `theta` - The parameters to update.
/// * `grad` - The gradient of the loss with respect to `theta`.
/// * `accum_sq_grad` - The squared gradient moving average, persisted by the caller.
/// * `decay` - The decay of the moving average, in `[0, 1)`.
/// * `step_size` - The base length of the step.
///
/// # Returns
/// A `SizeMismatch` error if the containers hold a different amount of elements,
/// in which case nothing is modified.
pub fn rmsprop_update<T, P, G, S>(
    theta: &mut P,
    grad: &G,
    accum_sq_grad: &mut S,
    decay: T,
    step_size: T,
) -> Result<()>
where
    T: Scalar,
    P: ContainerMut<T> + ?Sized,
    G: Container<T> + ?Sized,
    S: ContainerMut<T> + ?Sized,
{
    let mut theta = theta.flat_mut()?;
    let grad = grad.flat()?;
    let mut accum = accum_sq_grad.flat_mut()?;
    check_len(theta.len(), grad.len())?;
    check_len(theta.len(), accum.len())?;

    grad.for_each_active(|i, g| formula::rmsprop_accumulate(accum.get_mut(i), g, decay));
    grad.for_each_active(|i, g| {
        formula::guarded_step(theta.get_mut(i), g, accum.get(i), step_size);
    });

    Ok(())
}
