//! Error types for curve operations.

use sovcurve_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Too few usable instruments to attempt a fit.
    #[error("Insufficient data: need at least {required} instruments, got {actual}")]
    InsufficientData {
        /// Minimum required instruments.
        required: usize,
        /// Instruments available after filtering.
        actual: usize,
    },

    /// The optimizer failed or produced an unusable result.
    #[error("Curve fit failed: {source}")]
    FitError {
        /// Underlying numeric failure.
        source: MathError,
    },

    /// Requested maturity is not a finite positive number of years.
    #[error("Invalid maturity: {input} (expected a positive number of years)")]
    InvalidMaturity {
        /// The rejected input, as given.
        input: String,
    },

    /// Reference-point selection over an empty set.
    #[error("Empty input: no instruments to select from")]
    EmptyInput,
}

impl CurveError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates an invalid maturity error.
    #[must_use]
    pub fn invalid_maturity(input: impl Into<String>) -> Self {
        Self::InvalidMaturity {
            input: input.into(),
        }
    }
}

impl From<MathError> for CurveError {
    fn from(source: MathError) -> Self {
        Self::FitError { source }
    }
}
