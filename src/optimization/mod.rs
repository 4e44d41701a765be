mod adagrad;
mod adam;
mod const_step;
pub(crate) mod formula;
mod observer;
mod passive_aggressive;
mod rmsprop;

pub use adagrad::adagrad_update;
pub use adam::adam_update;
pub use const_step::{const_step_update, const_step_update_momentum};
pub use observer::{FnObserver, LogObserver, NoopObserver, StepObserver};
pub use passive_aggressive::{pa_update, pa_update_observed};
pub use rmsprop::rmsprop_update;
