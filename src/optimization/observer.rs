use log::debug;

use crate::Scalar;

/// Receives the scalar step sizes computed by rules with a global step.
pub trait StepObserver<T> {
    /// Called once per applied update with the computed step size.
    fn on_step_size(&mut self, step_size: T);
}

/// An observer that discards every value.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl<T> StepObserver<T> for NoopObserver {
    fn on_step_size(&mut self, _step_size: T) {}
}

/// An observer that reports every step size through the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl<T: Scalar> StepObserver<T> for LogObserver {
    fn on_step_size(&mut self, step_size: T) {
        let step_size: f64 = step_size.into();
        debug!(step_size = step_size; "passive-aggressive step");
    }
}

/// Adapts a closure into a `StepObserver`.
#[derive(Debug, Clone, Copy)]
pub struct FnObserver<F>(pub F);

impl<T, F: FnMut(T)> StepObserver<T> for FnObserver<F> {
    fn on_step_size(&mut self, step_size: T) {
        (self.0)(step_size)
    }
}
