use super::formula;
use crate::{
    Result, Scalar,
    error::check_len,
    storage::{Container, ContainerMut, Elements, ElementsMut},
};

/// Adagrad: steps each parameter by the inverse root of its accumulated squared gradients.
///
/// First `accum_sq_grad[i] += grad[i]^2` for every active index of `grad`, then
/// `theta[i] -= step_size / sqrt(accum_sq_grad[i]) * grad[i]` wherever the accumulator is
/// positive.
///
/// # Arguments
/// * `theta` - The parameters to update.
/// * `grad` - The gradient of the loss with respect to `theta`.
/// * `accum_sq_grad` - The squared gradient accumulator, persisted by the caller.
/// * `step_size` - The base length of the step.
///
/// # Returns
/// A `SizeMismatch` error if the containers hold a different amount of elements,
/// in which case nothing is modified.
pub fn adagrad_update<T, P, G, S>(
    theta: &mut P,
    grad: &G,
    accum_sq_grad: &mut S,
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

    grad.for_each_active(|i, g| formula::adagrad_accumulate(accum.get_mut(i), g));
    grad.for_each_active(|i, g| {
        formula::guarded_step(theta.get_mut(i), g, accum.get(i), step_size);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::SparseVector;

    #[test]
    fn adagrad_first_step_is_sign_of_gradient() {
        let mut theta = vec![0.0f64; 3];
        let mut accum = vec![0.0; 3];
        let grad = vec![2., -4., 0.];

        adagrad_update(&mut theta, &grad, &mut accum, 0.1).unwrap();

        assert_eq!(accum, vec![4., 16., 0.]);
        assert_eq!(theta, vec![-0.1, 0.1, 0.]);
    }

    #[test]
    fn adagrad_zero_gradient_twice_changes_nothing() {
        let mut theta = vec![0.5f64, -1.];
        let mut accum = vec![4., 0.];
        let grad = vec![0.; 2];

        for _ in 0..2 {
            adagrad_update(&mut theta, &grad, &mut accum, 0.1).unwrap();
            assert_eq!(theta, vec![0.5, -1.]);
            assert_eq!(accum, vec![4., 0.]);
        }
    }

    #[test]
    fn adagrad_sparse_leaves_unseen_features() {
        let mut theta = SparseVector::from_entries(3, [(0, 1.0f64), (2, 1.)]).unwrap();
        let mut accum = SparseVector::new(3);
        let grad = SparseVector::from_entries(3, [(2, 2.)]).unwrap();

        adagrad_update(&mut theta, &grad, &mut accum, 0.5).unwrap();

        assert_eq!(accum.iter().collect::<Vec<_>>(), vec![(2, 4.)]);
        assert_eq!(theta.to_dense(), vec![1., 0., 0.5]);
    }

    #[test]
    fn adagrad_matrix_matches_flat_vector() {
        let mut theta = array![[1.0f64, 2.], [3., 4.]];
        let mut accum = array![[1.0, 0.], [0., 1.]];
        let grad = array![[1.0, 2.], [0., -1.]];

        let mut flat_theta = vec![1.0f64, 2., 3., 4.];
        let mut flat_accum = vec![1.0, 0., 0., 1.];
        let flat_grad = vec![1.0, 2., 0., -1.];

        adagrad_update(&mut theta, &grad, &mut accum, 0.3).unwrap();
        adagrad_update(&mut flat_theta, &flat_grad, &mut flat_accum, 0.3).unwrap();

        assert_eq!(theta.as_slice().unwrap(), flat_theta.as_slice());
        assert_eq!(accum.as_slice().unwrap(), flat_accum.as_slice());
    }
}
