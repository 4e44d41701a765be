use super::formula;
use crate::{
    Result, Scalar,
    error::check_len,
    storage::{Container, ContainerMut, Elements, ElementsMut},
};

/// Takes a fixed step in the opposite direction of the gradient.
///
/// `theta[i] -= step_size * grad[i]` for every active index of `grad`.
///
/// # Arguments
/// * `theta` - The parameters to update.
/// * `grad` - The gradient of the loss with respect to `theta`.
/// * `step_size` - The length of the step.
///
/// # Returns
/// A `SizeMismatch` error if `theta` and `grad` hold a different amount of elements,
/// in which case nothing is modified.
pub fn const_step_update<T, P, G>(theta: &mut P, grad: &G, step_size: T) -> Result<()>
where
    T: Scalar,
    P: ContainerMut<T> + ?Sized,
    G: Container<T> + ?Sized,
{
    let mut theta = theta.flat_mut()?;
    let grad = grad.flat()?;
    check_len(theta.len(), grad.len())?;

    grad.for_each_active(|i, g| formula::const_step(theta.get_mut(i), g, step_size));
    Ok(())
}

/// Takes a fixed step along an exponential moving average of the gradients.
///
/// Every stored entry of `momentum_state` decays by `momentum`, then the gradient's active
/// entries add `(1 - momentum) * grad[i]`, and finally `theta[i] -= step_size * u[i]` over the
/// state's active indices. For sparse state this keeps moving parameters whose momentum was
/// accumulated in earlier calls even if they're absent from the current gradient.
///
/// # Arguments
/// * `theta` - The parameters to update.
/// * `grad` - The gradient of the loss with respect to `theta`.
/// * `momentum_state` - The momentum buffer, persisted by the caller across calls.
/// * `momentum` - The decay of the momentum buffer, in `[0, 1)`.
/// * `step_size` - The length of the step.
///
/// # Returns
/// A `SizeMismatch` error if the containers hold a different amount of elements,
/// in which case nothing is modified.
pub fn const_step_update_momentum<T, P, G, S>(
    theta: &mut P,
    grad: &G,
    momentum_state: &mut S,
    momentum: T,
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
    let mut update = momentum_state.flat_mut()?;
    check_len(theta.len(), grad.len())?;
    check_len(theta.len(), update.len())?;

    update.for_each_active_mut(|_, u| formula::decay_momentum(u, momentum));
    grad.for_each_active(|i, g| formula::add_momentum(update.get_mut(i), g, momentum));
    update.for_each_active(|i, u| formula::const_step(theta.get_mut(i), u, step_size));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OptErr, SparseVector};

    #[test]
    fn const_step_moves_against_gradient() {
        let mut theta = vec![1.0f64, 2., 3.];
        let grad = vec![1., -2., 0.];

        const_step_update(&mut theta, &grad, 0.5).unwrap();

        assert_eq!(theta, vec![0.5, 3., 3.]);
    }

    #[test]
    fn const_step_rejects_size_mismatch() {
        let mut theta = vec![1.0f64, 2.];
        let grad = vec![1., 1., 1.];

        let err = const_step_update(&mut theta, &grad, 0.5).unwrap_err();

        assert_eq!(err, OptErr::SizeMismatch { expected: 2, got: 3 });
        assert_eq!(theta, vec![1., 2.]);
    }

    #[test]
    fn const_step_sparse_only_touches_gradient_keys() {
        let mut theta = SparseVector::from_entries(5, [(0, 1.0f64), (3, 1.)]).unwrap();
        let grad = SparseVector::from_entries(5, [(3, 2.), (4, 1.)]).unwrap();

        const_step_update(&mut theta, &grad, 0.25).unwrap();

        assert_eq!(theta.to_dense(), vec![1., 0., 0., 0.5, -0.25]);
    }

    #[test]
    fn const_step_dense_params_sparse_grad() {
        let mut theta = [1.0f32; 4];
        let grad = SparseVector::from_entries(4, [(2, 4.)]).unwrap();

        const_step_update(theta.as_mut_slice(), &grad, 0.5).unwrap();

        assert_eq!(theta, [1., 1., -1., 1.]);
    }

    #[test]
    fn momentum_accumulates_moving_average() {
        let mut theta = vec![0.0f64; 2];
        let mut u = vec![0.0; 2];
        let grad = vec![1., -1.];

        const_step_update_momentum(&mut theta, &grad, &mut u, 0.5, 1.).unwrap();
        assert_eq!(u, vec![0.5, -0.5]);
        assert_eq!(theta, vec![-0.5, 0.5]);

        const_step_update_momentum(&mut theta, &grad, &mut u, 0.5, 1.).unwrap();
        assert_eq!(u, vec![0.75, -0.75]);
        assert_eq!(theta, vec![-1.25, 1.25]);
    }

    #[test]
    fn momentum_sparse_decays_stale_entries() {
        let mut theta = SparseVector::from_entries(4, [(0, 1.0f64)]).unwrap();
        let mut u = SparseVector::from_entries(4, [(0, 2.)]).unwrap();
        let grad = SparseVector::from_entries(4, [(2, 1.)]).unwrap();

        const_step_update_momentum(&mut theta, &grad, &mut u, 0.5, 0.5).unwrap();

        assert_eq!(u.value(0), 1.);
        assert_eq!(u.value(2), 0.5);
        assert_eq!(theta.value(0), 0.5);
        assert_eq!(theta.value(2), -0.25);
    }

    #[test]
    fn momentum_checks_state_before_mutating() {
        let mut theta = vec![1.0f64; 3];
        let mut u = vec![1.0; 2];
        let grad = vec![1.; 3];

        let err = const_step_update_momentum(&mut theta, &grad, &mut u, 0.9, 0.1).unwrap_err();

        assert_eq!(err, OptErr::SizeMismatch { expected: 3, got: 2 });
        assert_eq!(theta, vec![1.; 3]);
        assert_eq!(u, vec![1.; 2]);
    }
}
