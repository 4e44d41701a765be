use serde::{Deserialize, Serialize};

use crate::{
    OptErr, Result, Scalar,
    optimizers::{Adagrad, Adam, GradientDescent, GradientDescentWithMomentum, Optimizer, RmsProp},
};

/// The hyperparameters of a stateful `Optimizer`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerConfig<T = f32> {
    GradientDescent {
        learning_rate: T,
    },
    GradientDescentWithMomentum {
        learning_rate: T,
        momentum: T,
    },
    Adagrad {
        learning_rate: T,
    },
    #[serde(rename = "rmsprop")]
    RmsProp {
        learning_rate: T,
        decay: T,
    },
    Adam {
        learning_rate: T,
        beta1: T,
        beta2: T,
    },
}

impl<T> OptimizerConfig<T>
where
    T: Scalar + for<'de> Deserialize<'de>,
{
    /// Parses a configuration from its json representation.
    ///
    /// # Arguments
    /// * `json` - e.g. `{"adam": {"learning_rate": 0.001, "beta1": 0.9, "beta2": 0.999}}`.
    ///
    /// # Returns
    /// The parsed configuration or an `InvalidConfig` error.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| OptErr::InvalidConfig(e.to_string()))
    }
}

/// Builds `Optimizer`s given a configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct OptimizerBuilder;

impl OptimizerBuilder {
    /// Creates a new `OptimizerBuilder`.
    ///
    /// # Returns
    /// A new `OptimizerBuilder` instance.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Optimizer` following a configuration.
    ///
    /// # Arguments
    /// * `config` - The optimizer's hyperparameters.
    /// * `len` - The amount of parameters the optimizer will update.
    ///
    /// # Returns
    /// A new zero initialized optimizer or an `InvalidHyperparameter` error.
    pub fn build<T: Scalar>(
        &self,
        config: OptimizerConfig<T>,
        len: usize,
    ) -> Result<Box<dyn Optimizer<T> + Send>> {
        let optimizer: Box<dyn Optimizer<T> + Send> = match config {
            OptimizerConfig::GradientDescent { learning_rate } => {
                positive("learning_rate", learning_rate)?;
                Box::new(GradientDescent::new(learning_rate))
            }
            OptimizerConfig::GradientDescentWithMomentum {
                learning_rate,
                momentum,
            } => {
                positive("learning_rate", learning_rate)?;
                unit_interval("momentum", momentum)?;
                Box::new(GradientDescentWithMomentum::new(len, learning_rate, momentum))
            }
            OptimizerConfig::Adagrad { learning_rate } => {
                positive("learning_rate", learning_rate)?;
                Box::new(Adagrad::new(len, learning_rate))
            }
            OptimizerConfig::RmsProp {
                learning_rate,
                decay,
            } => {
                positive("learning_rate", learning_rate)?;
                unit_interval("decay", decay)?;
                Box::new(RmsProp::new(len, learning_rate, decay))
            }
            OptimizerConfig::Adam {
                learning_rate,
                beta1,
                beta2,
            } => {
                positive("learning_rate", learning_rate)?;
                unit_interval("beta1", beta1)?;
                unit_interval("beta2", beta2)?;
                Box::new(Adam::new(len, learning_rate, beta1, beta2))
            }
        };

        Ok(optimizer)
    }
}

fn positive<T: Scalar>(name: &'static str, value: T) -> Result<()> {
    if value > T::zero() && value.is_finite() {
        return Ok(());
    }

    Err(OptErr::InvalidHyperparameter {
        name,
        value: value.into(),
    })
}

fn unit_interval<T: Scalar>(name: &'static str, value: T) -> Result<()> {
    if value >= T::zero() && value < T::one() {
        return Ok(());
    }

    Err(OptErr::InvalidHyperparameter {
        name,
        value: value.into(),
    })
}
