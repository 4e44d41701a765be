use std::{error::Error, fmt};

/// The crate's result type.
pub type Result<T> = std::result::Result<T, OptErr>;

/// Precondition violations detected before an update touches any element.
#[derive(Debug, Clone, PartialEq)]
pub enum OptErr {
    /// A parameter, gradient or state container has a different element count.
    SizeMismatch { expected: usize, got: usize },
    /// Two parameter groups have a different amount of layers.
    GroupMismatch { expected: usize, got: usize },
    /// A dense array isn't laid out contiguously in standard order.
    NonContiguous,
    /// A sparse index falls outside of the sparse vector's dimension.
    OutOfDomain { index: usize, dim: usize },
    /// A sparse index was given more than once.
    DuplicateIndex { index: usize },
    /// A hyperparameter is outside of its valid range.
    InvalidHyperparameter { name: &'static str, value: f64 },
    /// An optimizer configuration couldn't be parsed.
    InvalidConfig(String),
    /// The device couldn't be initialized.
    Device(String),
}

impl fmt::Display for OptErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, got } => {
                write!(f, "size mismatch: expected {expected} elements, got {got}")
            }
            Self::GroupMismatch { expected, got } => {
                write!(f, "group mismatch: expected {expected} layers, got {got}")
            }
            Self::NonContiguous => f.write_str("array is not contiguous in standard layout"),
            Self::OutOfDomain { index, dim } => {
                write!(f, "sparse index {index} out of domain for dimension {dim}")
            }
            Self::DuplicateIndex { index } => write!(f, "duplicate sparse index {index}"),
            Self::InvalidHyperparameter { name, value } => {
                write!(f, "invalid hyperparameter {name}: {value}")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid optimizer config: {msg}"),
            Self::Device(msg) => write!(f, "device error: {msg}"),
        }
    }
}

impl Error for OptErr {}

/// Checks that a container holds as many elements as the parameters.
///
/// # Arguments
/// * `expected` - The amount of parameters.
/// * `got` - The amount of elements in the other container.
///
/// # Returns
/// A `SizeMismatch` error if both sizes differ.
pub(crate) fn check_len(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(OptErr::SizeMismatch { expected, got });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_len_accepts_equal_sizes() {
        assert!(check_len(3, 3).is_ok());
    }

    #[test]
    fn check_len_reports_both_sizes() {
        let err = check_len(3, 2).unwrap_err();
        assert_eq!(err, OptErr::SizeMismatch { expected: 3, got: 2 });
        assert_eq!(err.to_string(), "size mismatch: expected 3 elements, got 2");
    }
}
