//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during mathematical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Optimizer used up its function-evaluation budget.
    #[error(
        "Evaluation budget exhausted: {evaluations} function evaluations over {iterations} iterations (sum of squares: {residual:.2e})"
    )]
    BudgetExhausted {
        /// Function evaluations performed.
        evaluations: usize,
        /// Outer iterations completed.
        iterations: usize,
        /// Sum of squared residuals at the best point found.
        residual: f64,
    },

    /// Matrix is singular (not invertible).
    #[error("Singular matrix: cannot invert")]
    SingularMatrix,

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Computation produced NaN or infinity.
    #[error("Non-finite value in {operation}")]
    NonFinite {
        /// The operation that produced the value.
        operation: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a non-finite value error.
    #[must_use]
    pub fn non_finite(operation: impl Into<String>) -> Self {
        Self::NonFinite {
            operation: operation.into(),
        }
    }
}
