use std::fmt::Debug;

use num_traits::{Float, NumAssign};

/// The floating point element types the update rules operate on.
pub trait Scalar: Float + NumAssign + Into<f64> + Debug + Send + Sync + 'static {
    /// The constant added to Adam's denominator.
    const ADAM_EPSILON: Self;

    /// Converts an Adam time step into an exponent.
    fn from_step(step: u64) -> Self;
}

impl Scalar for f32 {
    const ADAM_EPSILON: Self = 1e-8;

    fn from_step(step: u64) -> Self {
        step as f32
    }
}

impl Scalar for f64 {
    const ADAM_EPSILON: Self = 1e-8;

    fn from_step(step: u64) -> Self {
        step as f64
    }
}
