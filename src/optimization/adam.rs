use super::formula;
use crate::{
    Result, Scalar,
    error::check_len,
    storage::{Container, ContainerMut, Elements, ElementsMut},
};

/// Adam: steps along bias corrected estimates of the gradient's first and second moments.
///
/// The moments are updated for every active index of `grad` first,
/// ```text
/// m[i] = beta1 * m[i] + (1 - beta1) * grad[i]
/// v[i] = beta2 * v[i] + (1 - beta2) * grad[i]^2
/// ```
/// then, with `b1 = 1 - beta1^(t+1)` and `b2 = 1 - beta2^(t+1)`,
/// ```text
/// theta[i] -= alpha * m[i] / b1 / (sqrt(v[i] / b2) + 1e-8)
/// ```
/// and `time` is advanced by one.
///
/// # Arguments
/// * `theta` - The parameters to update.
/// * `grad` - The gradient of the loss with respect to `theta`.
/// * `first_moment` - The first moment estimate, persisted by the caller.
/// * `second_moment` - The second moment estimate, persisted by the caller.
/// * `time` - The amount of updates applied so far, persisted by the caller.
/// * `alpha` - The base length of the step.
/// * `beta1`, `beta2` - The decays of the moment estimates, in `[0, 1)`.
///
/// # Returns
/// A `SizeMismatch` error if the containers hold a different amount of elements,
/// in which case neither the containers nor `time` are modified.
#[allow(clippy::too_many_arguments)]
pub fn adam_update<T, P, G, M, V>(
    theta: &mut P,
    grad: &G,
    first_moment: &mut M,
    second_moment: &mut V,
    time: &mut u64,
    alpha: T,
    beta1: T,
    beta2: T,
) -> Result<()>
where
    T: Scalar,
    P: ContainerMut<T> + ?Sized,
    G: Container<T> + ?Sized,
    M: ContainerMut<T> + ?Sized,
    V: ContainerMut<T> + ?Sized,
{
    let mut theta = theta.flat_mut()?;
    let grad = grad.flat()?;
    let mut m = first_moment.flat_mut()?;
    let mut v = second_moment.flat_mut()?;
    check_len(theta.len(), grad.len())?;
    check_len(theta.len(), m.len())?;
    check_len(theta.len(), v.len())?;

    grad.for_each_active(|i, g| {
        formula::adam_moments(m.get_mut(i), v.get_mut(i), g, beta1, beta2);
    });

    let (bc1, bc2) = formula::bias_corrections(beta1, beta2, *time);
    grad.for_each_active(|i, _| {
        formula::adam_step(theta.get_mut(i), m.get(i), v.get(i), alpha, bc1, bc2);
    });

    *time += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{OptErr, SparseVector};

    #[test]
    fn adam_first_step_from_zero_moments() {
        let mut theta = vec![0.0f64];
        let mut m = vec![0.0];
        let mut v = vec![0.0];
        let mut time = 0;

        adam_update(&mut theta, &[1.0], &mut m, &mut v, &mut time, 0.001, 0.9, 0.999).unwrap();

        assert_eq!(time, 1);
        assert_abs_diff_eq!(m[0], 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(v[0], 0.001, epsilon = 1e-12);
        assert_abs_diff_eq!(theta[0], -0.001 / (1. + 1e-8), epsilon = 1e-12);
    }

    #[test]
    fn adam_time_advances_once_per_call() {
        let mut theta = vec![0.0f32; 4];
        let mut m = vec![0.0; 4];
        let mut v = vec![0.0; 4];
        let grad = vec![0.5; 4];
        let mut time = 7;

        for _ in 0..3 {
            adam_update(&mut theta, &grad, &mut m, &mut v, &mut time, 0.01, 0.9, 0.99).unwrap();
        }

        assert_eq!(time, 10);
    }

    #[test]
    fn adam_mismatch_keeps_time() {
        let mut theta = vec![0.0f64; 2];
        let mut m = vec![0.0; 2];
        let mut v = vec![0.0; 3];
        let mut time = 4;

        let err = adam_update(&mut theta, &[1., 1.], &mut m, &mut v, &mut time, 0.1, 0.9, 0.999)
            .unwrap_err();

        assert_eq!(err, OptErr::SizeMismatch { expected: 2, got: 3 });
        assert_eq!(time, 4);
        assert_eq!(m, vec![0.; 2]);
    }

    #[test]
    fn adam_sparse_skips_absent_indices() {
        let mut theta = SparseVector::from_entries(3, [(0, 1.0f64)]).unwrap();
        let mut m = SparseVector::from_entries(3, [(0, 0.5)]).unwrap();
        let mut v = SparseVector::from_entries(3, [(0, 0.25)]).unwrap();
        let grad = SparseVector::from_entries(3, [(2, 1.)]).unwrap();
        let mut time = 0;

        adam_update(&mut theta, &grad, &mut m, &mut v, &mut time, 0.1, 0.9, 0.999).unwrap();

        assert_eq!(theta.value(0), 1.);
        assert_eq!(m.value(0), 0.5);
        assert_eq!(v.value(0), 0.25);
        assert!(theta.value(2) < 0.);
        assert_eq!(time, 1);
    }
}
