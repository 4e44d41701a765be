use super::{NoopObserver, StepObserver, formula};
use crate::{
    Result, Scalar,
    error::check_len,
    storage::{Container, ContainerMut, Elements, ElementsMut},
};

/// Passive-aggressive update for a margin loss.
///
/// See `pa_update_observed`, the computed step size is discarded.
pub fn pa_update<T, P, G>(theta: &mut P, grad: &G, loss: T) -> Result<()>
where
    T: Scalar,
    P: ContainerMut<T> + ?Sized,
    G: Container<T> + ?Sized,
{
    pa_update_observed(theta, grad, loss, &mut NoopObserver)
}

/// Passive-aggressive update for a margin loss, reporting the step size to `observer`.
///
/// Stays passive when `loss <= 0`. Otherwise a single step size `loss / sum(grad[i]^2)` is
/// computed over the whole gradient before any parameter changes, and
/// `theta[i] -= grad[i] * step_size` for every active index of `grad`. A gradient with a zero
/// norm leaves `theta` untouched as well.
///
/// # Arguments
/// * `theta` - The parameters to update.
/// * `grad` - The gradient of the loss with respect to `theta`.
/// * `loss` - The loss of the current example.
/// * `observer` - Receives the step size whenever the update is applied.
///
/// # Returns
/// A `SizeMismatch` error if `theta` and `grad` hold a different amount of elements,
/// in which case nothing is modified.
pub fn pa_update_observed<T, P, G, O>(
    theta: &mut P,
    grad: &G,
    loss: T,
    observer: &mut O,
) -> Result<()>
where
    T: Scalar,
    P: ContainerMut<T> + ?Sized,
    G: Container<T> + ?Sized,
    O: StepObserver<T> + ?Sized,
{
    let mut theta = theta.flat_mut()?;
    let grad = grad.flat()?;
    check_len(theta.len(), grad.len())?;

    if loss.is_nan() || loss <= T::zero() {
        return Ok(());
    }

    let mut grad_norm_sq = T::zero();
    grad.for_each_active(|_, g| grad_norm_sq += g * g);

    let Some(step_size) = formula::pa_step_size(loss, grad_norm_sq) else {
        return Ok(());
    };

    observer.on_step_size(step_size);
    grad.for_each_active(|i, g| formula::const_step(theta.get_mut(i), g, step_size));

    Ok(())
}
