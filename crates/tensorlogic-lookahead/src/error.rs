//! Error types for optimizer operations.

use thiserror::Error;

/// Errors that can occur while stepping an optimizer.
#[derive(Error, Debug)]
pub enum TrainError {
    /// Error raised by an optimizer while updating parameters.
    #[error("Optimizer error: {0}")]
    OptimizerError(String),

    /// Two tensors that must agree in shape do not.
    #[error("Shape mismatch for parameter '{name}': expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Name of the parameter being updated.
        name: String,
        /// Shape of the parameter (fast weight).
        expected: (usize, usize),
        /// Shape of the tensor it was combined with.
        found: (usize, usize),
    },

    /// Error with invalid parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error raised by a loss/gradient closure passed to `step`.
    #[error("Closure error: {0}")]
    ClosureError(String),

    /// Error in configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

/// Result type for optimizer operations.
pub type TrainResult<T> = Result<T, TrainError>;

/// Check that `found` has the same shape as the parameter `name`.
pub(crate) fn ensure_same_shape(
    name: &str,
    expected: (usize, usize),
    found: (usize, usize),
) -> TrainResult<()> {
    if expected != found {
        return Err(TrainError::ShapeMismatch {
            name: name.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = ensure_same_shape("w", (2, 3), (3, 2)).unwrap_err();
        assert!(matches!(err, TrainError::ShapeMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "Shape mismatch for parameter 'w': expected (2, 3), found (3, 2)"
        );
    }

    #[test]
    fn test_same_shape_ok() {
        assert!(ensure_same_shape("w", (1, 1), (1, 1)).is_ok());
    }
}
