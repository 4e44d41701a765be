//! Per-element update formulas.
//!
//! Host and device kernels only differ in how they traverse the elements, the arithmetic is
//! always one of these functions so both produce the same bits for the same inputs.

use crate::Scalar;

#[inline]
pub(crate) fn const_step<T: Scalar>(theta: &mut T, g: T, step_size: T) {
    *theta -= step_size * g;
}

#[inline]
pub(crate) fn decay_momentum<T: Scalar>(u: &mut T, momentum: T) {
    *u *= momentum;
}

#[inline]
pub(crate) fn add_momentum<T: Scalar>(u: &mut T, g: T, momentum: T) {
    *u += (T::one() - momentum) * g;
}

#[inline]
pub(crate) fn adagrad_accumulate<T: Scalar>(acc: &mut T, g: T) {
    *acc += g * g;
}

#[inline]
pub(crate) fn rmsprop_accumulate<T: Scalar>(acc: &mut T, g: T, decay: T) {
    *acc = decay * *acc + (T::one() - decay) * (g * g);
}

/// Steps `theta` scaled by the root of its accumulator.
///
/// A parameter whose accumulator is still zero has never seen a nonzero gradient and is left
/// untouched. NaN accumulators fail the comparison and are skipped too.
#[inline]
pub(crate) fn guarded_step<T: Scalar>(theta: &mut T, g: T, acc: T, step_size: T) {
    if acc > T::zero() {
        *theta -= step_size / acc.sqrt() * g;
    }
}

/// Returns the passive-aggressive step size, `None` if the update must be skipped.
#[inline]
pub(crate) fn pa_step_size<T: Scalar>(loss: T, grad_norm_sq: T) -> Option<T> {
    if loss > T::zero() && grad_norm_sq > T::zero() {
        Some(loss / grad_norm_sq)
    } else {
        None
    }
}

#[inline]
pub(crate) fn adam_moments<T: Scalar>(m: &mut T, v: &mut T, g: T, beta1: T, beta2: T) {
    *m = beta1 * *m + (T::one() - beta1) * g;
    *v = beta2 * *v + (T::one() - beta2) * (g * g);
}

/// Returns Adam's bias corrections `(1 - beta1^(t+1), 1 - beta2^(t+1))`.
#[inline]
pub(crate) fn bias_corrections<T: Scalar>(beta1: T, beta2: T, time: u64) -> (T, T) {
    let exp = T::from_step(time + 1);
    (T::one() - beta1.powf(exp), T::one() - beta2.powf(exp))
}

#[inline]
pub(crate) fn adam_step<T: Scalar>(theta: &mut T, m: T, v: T, alpha: T, bc1: T, bc2: T) {
    *theta -= alpha * m / bc1 / ((v / bc2).sqrt() + T::ADAM_EPSILON);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarded_step_skips_empty_accumulators() {
        let mut theta = 1.0f64;

        guarded_step(&mut theta, 3., 0., 0.5);
        assert_eq!(theta, 1.);

        guarded_step(&mut theta, 3., -0., 0.5);
        assert_eq!(theta, 1.);

        guarded_step(&mut theta, 3., f64::NAN, 0.5);
        assert_eq!(theta, 1.);
    }

    #[test]
    fn guarded_step_scales_by_root() {
        let mut theta = 1.0f64;
        guarded_step(&mut theta, 2., 4., 0.5);
        assert_eq!(theta, 0.5);
    }

    #[test]
    fn pa_step_size_requires_positive_loss_and_norm() {
        assert_eq!(pa_step_size(0.0f64, 1.), None);
        assert_eq!(pa_step_size(-1.0f64, 1.), None);
        assert_eq!(pa_step_size(f64::NAN, 1.), None);
        assert_eq!(pa_step_size(1.0f64, 0.), None);
        assert_eq!(pa_step_size(1.0f64, 4.), Some(0.25));
    }

    #[test]
    fn bias_corrections_use_next_step() {
        let (bc1, bc2) = bias_corrections(0.5f64, 0.25, 1);
        assert_eq!(bc1, 0.75);
        assert_eq!(bc2, 1. - 0.0625);
    }
}
