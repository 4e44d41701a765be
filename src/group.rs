//! Update rules over groups of parameter containers, e.g. the layers of a model.
//!
//! Every layer is updated by the single container rule, in order, with no aggregation across
//! layers. The whole group is validated before the first layer is touched.

use crate::{
    OptErr, Result, Scalar,
    error::check_len,
    optimization::{
        NoopObserver, StepObserver, adagrad_update, adam_update, const_step_update,
        const_step_update_momentum, pa_update_observed, rmsprop_update,
    },
    storage::{Container, ContainerMut, Elements},
};

/// Returns the amount of elements of each layer.
fn layer_lens<T, C>(layers: &[C]) -> Result<Vec<usize>>
where
    T: Scalar,
    C: Container<T>,
{
    layers.iter().map(|layer| Ok(layer.flat()?.len())).collect()
}

/// Checks that a group has the same layout as the parameters.
///
/// # Arguments
/// * `expected` - The size of each parameter layer.
/// * `layers` - The group to check against.
///
/// # Returns
/// A `GroupMismatch` error if the amount of layers differs or a `SizeMismatch` error
/// if any pair of layers differ in size.
fn check_group<T, C>(expected: &[usize], layers: &[C]) -> Result<()>
where
    T: Scalar,
    C: Container<T>,
{
    let got = layer_lens::<T, C>(layers)?;

    if expected.len() != got.len() {
        return Err(OptErr::GroupMismatch {
            expected: expected.len(),
            got: got.len(),
        });
    }

    expected
        .iter()
        .zip(&got)
        .try_for_each(|(&e, &g)| check_len(e, g))
}

/// Applies `const_step_update` to every layer.
pub fn const_step_update_group<T, P, G>(theta: &mut [P], grad: &[G], step_size: T) -> Result<()>
where
    T: Scalar,
    P: ContainerMut<T>,
    G: Container<T>,
{
    let lens = layer_lens::<T, P>(theta)?;
    check_group::<T, G>(&lens, grad)?;

    theta
        .iter_mut()
        .zip(grad)
        .try_for_each(|(p, g)| const_step_update(p, g, step_size))
}

/// Applies `const_step_update_momentum` to every layer.
pub fn const_step_update_momentum_group<T, P, G, S>(
    theta: &mut [P],
    grad: &[G],
    momentum_state: &mut [S],
    momentum: T,
    step_size: T,
) -> Result<()>
where
    T: Scalar,
    P: ContainerMut<T>,
    G: Container<T>,
    S: ContainerMut<T>,
{
    let lens = layer_lens::<T, P>(theta)?;
    check_group::<T, G>(&lens, grad)?;
    check_group::<T, S>(&lens, momentum_state)?;

    theta
        .iter_mut()
        .zip(grad)
        .zip(momentum_state.iter_mut())
        .try_for_each(|((p, g), u)| const_step_update_momentum(p, g, u, momentum, step_size))
}

/// Applies `pa_update` to every layer with the same `loss`.
pub fn pa_update_group<T, P, G>(theta: &mut [P], grad: &[G], loss: T) -> Result<()>
where
    T: Scalar,
    P: ContainerMut<T>,
    G: Container<T>,
{
    pa_update_group_observed(theta, grad, loss, &mut NoopObserver)
}

/// Applies `pa_update_observed` to every layer with the same `loss`.
///
/// Each layer computes its own step size, `observer` sees one value per updated layer.
pub fn pa_update_group_observed<T, P, G, O>(
    theta: &mut [P],
    grad: &[G],
    loss: T,
    observer: &mut O,
) -> Result<()>
where
    T: Scalar,
    P: ContainerMut<T>,
    G: Container<T>,
    O: StepObserver<T> + ?Sized,
{
    let lens = layer_lens::<T, P>(theta)?;
    check_group::<T, G>(&lens, grad)?;

    theta
        .iter_mut()
        .zip(grad)
        .try_for_each(|(p, g)| pa_update_observed(p, g, loss, &mut *observer))
}

/// Applies `adagrad_update` to every layer.
pub fn adagrad_update_group<T, P, G, S>(
    theta: &mut [P],
    grad: &[G],
    accum_sq_grad: &mut [S],
    step_size: T,
) -> Result<()>
where
    T: Scalar,
    P: ContainerMut<T>,
    G: Container<T>,
    S: ContainerMut<T>,
{
    let lens = layer_lens::<T, P>(theta)?;
    check_group::<T, G>(&lens, grad)?;
    check_group::<T, S>(&lens, accum_sq_grad)?;

    theta
        .iter_mut()
        .zip(grad)
        .zip(accum_sq_grad.iter_mut())
        .try_for_each(|((p, g), acc)| adagrad_update(p, g, acc, step_size))
}

/// Applies `rmsprop_update` to every layer.
pub fn rmsprop_update_group<T, P, G, S>(
    theta: &mut [P],
    grad: &[G],
    accum_sq_grad: &mut [S],
    decay: T,
    step_size: T,
) -> Result<()>
where
    T: Scalar,
    P: ContainerMut<T>,
    G: Container<T>,
    S: ContainerMut<T>,
{
    let lens = layer_lens::<T, P>(theta)?;
    check_group::<T, G>(&lens, grad)?;
    check_group::<T, S>(&lens, accum_sq_grad)?;

    theta
        .iter_mut()
        .zip(grad)
        .zip(accum_sq_grad.iter_mut())
        .try_for_each(|((p, g), acc)| rmsprop_update(p, g, acc, decay, step_size))
}

/// Applies `adam_update` to every layer.
///
/// All layers share the time step, it advances exactly once per call.
#[allow(clippy::too_many_arguments)]
pub fn adam_update_group<T, P, G, M, V>(
    theta: &mut [P],
    grad: &[G],
    first_moment: &mut [M],
    second_moment: &mut [V],
    time: &mut u64,
    alpha: T,
    beta1: T,
    beta2: T,
) -> Result<()>
where
    T: Scalar,
    P: ContainerMut<T>,
    G: Container<T>,
    M: ContainerMut<T>,
    V: ContainerMut<T>,
{
    let lens = layer_lens::<T, P>(theta)?;
    check_group::<T, G>(&lens, grad)?;
    check_group::<T, M>(&lens, first_moment)?;
    check_group::<T, V>(&lens, second_moment)?;

    let step = *time;

    theta
        .iter_mut()
        .zip(grad)
        .zip(first_moment.iter_mut())
        .zip(second_moment.iter_mut())
        .try_for_each(|(((p, g), m), v)| {
            let mut layer_time = step;
            adam_update(p, g, m, v, &mut layer_time, alpha, beta1, beta2)
        })?;

    *time += 1;
    Ok(())
}
