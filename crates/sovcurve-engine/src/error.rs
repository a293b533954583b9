//! Engine error types.

use serde::Serialize;
use sovcurve_core::types::Date;
use sovcurve_curves::CurveError;
use thiserror::Error;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
///
/// Every variant is recoverable at the request boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// No country in the request.
    #[error("country is required")]
    MissingCountry,

    /// No as-of date where one is required.
    #[error("date is required")]
    MissingDate,

    /// The as-of date does not parse.
    #[error("invalid date '{input}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// Nothing usable for the country on the date.
    #[error("no usable bond quotes for {country} on {date}")]
    NoDataForCountry {
        /// Requested country.
        country: String,
        /// As-of date.
        date: Date,
    },

    /// Filtering, fitting or evaluation failed.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

impl EngineError {
    /// Stable discriminant for callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCountry => ErrorKind::MissingCountry,
            Self::MissingDate | Self::InvalidDate { .. } => ErrorKind::InvalidDate,
            Self::NoDataForCountry { .. } => ErrorKind::NoDataForCountry,
            Self::Curve(CurveError::InsufficientData { .. }) => ErrorKind::InsufficientData,
            Self::Curve(CurveError::FitError { .. }) => ErrorKind::FitError,
            Self::Curve(CurveError::InvalidMaturity { .. }) => ErrorKind::InvalidMaturity,
            Self::Curve(CurveError::EmptyInput) => ErrorKind::EmptyInput,
        }
    }

    pub(crate) fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }
}

/// Error discriminant, serialized in snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Country missing from the request.
    MissingCountry,
    /// As-of date absent or unparseable.
    InvalidDate,
    /// No usable quotes for the country.
    NoDataForCountry,
    /// Too few usable quotes to fit.
    InsufficientData,
    /// Optimizer failure.
    FitError,
    /// Bad requested maturity.
    InvalidMaturity,
    /// Selection over an empty set.
    EmptyInput,
}

impl ErrorKind {
    /// The snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingCountry => "missing_country",
            Self::InvalidDate => "invalid_date",
            Self::NoDataForCountry => "no_data_for_country",
            Self::InsufficientData => "insufficient_data",
            Self::FitError => "fit_error",
            Self::InvalidMaturity => "invalid_maturity",
            Self::EmptyInput => "empty_input",
        }
    }

    /// HTTP-equivalent status class: 400 for caller input, 404 for no data,
    /// 500 for internal failure.
    pub fn status_class(&self) -> u16 {
        match self {
            Self::MissingCountry
            | Self::InvalidDate
            | Self::InsufficientData
            | Self::InvalidMaturity => 400,
            Self::NoDataForCountry | Self::EmptyInput => 404,
            Self::FitError => 500,
        }
    }
}

/// Error body shared by every presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    /// Human-readable message.
    pub error: String,
    /// Discriminant.
    pub kind: ErrorKind,
}

impl From<&EngineError> for ErrorPayload {
    fn from(err: &EngineError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}
