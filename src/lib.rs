//! First-order update rules for model parameters.
//!
//! Six rules (constant step, constant step with momentum, passive-aggressive, Adagrad, RMSProp
//! and Adam) run over any parameter container: dense slices and arrays, `ndarray` matrices,
//! `SparseVector`s, groups of layers and buffers resident in a `Device`. Every rule mutates the
//! parameters and its optimizer state in place.

pub mod config;
pub mod device;
mod error;
pub mod group;
pub mod optimization;
pub mod optimizers;
mod scalar;
pub mod storage;

pub use config::{OptimizerBuilder, OptimizerConfig};
pub use device::{Device, DeviceBuffer};
pub use error::{OptErr, Result};
pub use group::{
    adagrad_update_group, adam_update_group, const_step_update_group,
    const_step_update_momentum_group, pa_update_group, pa_update_group_observed,
    rmsprop_update_group,
};
pub use optimization::{
    FnObserver, LogObserver, NoopObserver, StepObserver, adagrad_update, adam_update,
    const_step_update, const_step_update_momentum, pa_update, pa_update_observed, rmsprop_update,
};
pub use optimizers::{
    Adagrad, Adam, GradientDescent, GradientDescentWithMomentum, Optimizer, RmsProp,
};
pub use scalar::Scalar;
pub use storage::{Container, ContainerMut, Elements, ElementsMut, SparseVector};
