use std::fmt;

/// Errors raised while validating or evaluating a launch scenario
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A distribution shape or configuration value is out of range
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Two model inputs disagree on their dimensions
    ShapeMismatch {
        input: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl ModelError {
    pub(crate) fn invalid(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        ModelError::InvalidParameter {
            parameter,
            value,
            reason,
        }
    }

    /// Fail with `ShapeMismatch` unless `actual == expected`.
    pub(crate) fn check_len(input: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(ModelError::ShapeMismatch {
                input,
                expected,
                actual,
            })
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "invalid parameter {parameter}={value}: {reason}"),
            ModelError::ShapeMismatch {
                input,
                expected,
                actual,
            } => write!(
                f,
                "shape mismatch for {input}: expected {expected} elements, got {actual}"
            ),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
