//! Request and response types.
//!
//! Yields leave the engine in percent, rounded per the display module.
//! Parameters leave unrounded; each presentation layer picks its precision
//! with [`SvenssonParameters::rounded`].

use serde::{Deserialize, Serialize};
use sovcurve_core::types::Date;
use sovcurve_curves::display::round_dp;
use sovcurve_curves::evaluation::TenorYield;

use crate::error::ErrorPayload;

/// A curve request as received from a caller.
///
/// Fields are raw text so that validation, and its error kinds, live in one
/// place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveRequest {
    /// Country key (exact match).
    pub country: Option<String>,
    /// As-of date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Free-form maturity in years to evaluate in addition to the grid.
    pub specific_maturity: Option<String>,
    /// Benchmark tenor override, in years.
    pub target_years: Option<f64>,
}

impl CurveRequest {
    /// Request for a country with every other field defaulted.
    pub fn for_country(country: impl Into<String>) -> Self {
        Self {
            country: Some(country.into()),
            ..Self::default()
        }
    }

    /// Sets the as-of date.
    #[must_use]
    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Sets the specific maturity.
    #[must_use]
    pub fn at_maturity(mut self, maturity: impl Into<String>) -> Self {
        self.specific_maturity = Some(maturity.into());
        self
    }

    /// Sets the benchmark tenor.
    #[must_use]
    pub fn with_target(mut self, years: f64) -> Self {
        self.target_years = Some(years);
        self
    }
}

/// The six Svensson parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SvenssonParameters {
    /// Long-term level.
    pub beta0: f64,
    /// Short-term component.
    pub beta1: f64,
    /// First hump component.
    pub beta2: f64,
    /// Second hump component.
    pub beta3: f64,
    /// First decay factor.
    pub tau1: f64,
    /// Second decay factor.
    pub tau2: f64,
}

impl SvenssonParameters {
    /// Copy with every parameter rounded to `dp` decimals.
    #[must_use]
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            beta0: round_dp(self.beta0, dp),
            beta1: round_dp(self.beta1, dp),
            beta2: round_dp(self.beta2, dp),
            beta3: round_dp(self.beta3, dp),
            tau1: round_dp(self.tau1, dp),
            tau2: round_dp(self.tau2, dp),
        }
    }

    /// (name, value) pairs in model order.
    pub fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("beta0", self.beta0),
            ("beta1", self.beta1),
            ("beta2", self.beta2),
            ("beta3", self.beta3),
            ("tau1", self.tau1),
            ("tau2", self.tau2),
        ]
    }
}

/// Yield at the caller's requested maturity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpecificYield {
    /// Maturity in years.
    pub maturity: f64,
    /// Yield in percent, three decimals.
    #[serde(rename = "yield")]
    pub yield_percent: f64,
}

/// Fit quality figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitDiagnostics {
    /// Instruments the curve was fitted to.
    pub instruments: usize,
    /// Optimizer iterations.
    pub iterations: usize,
    /// Residual function evaluations.
    pub function_evaluations: usize,
    /// RMS fitting error in basis points.
    pub rms_error_bps: f64,
    /// Largest absolute fitting error in basis points.
    pub max_error_bps: f64,
}

/// A fitted curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveOutput {
    /// Country key.
    pub country: String,
    /// As-of date used.
    pub date: Date,
    /// Unrounded parameters.
    pub parameters: SvenssonParameters,
    /// Yields on the standard grid.
    pub grid: Vec<TenorYield>,
    /// Yield at the requested maturity, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_maturity: Option<SpecificYield>,
    /// Fit quality.
    pub diagnostics: FitDiagnostics,
}

/// The benchmark bond nearest the target tenor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferencePointOutput {
    /// Country key.
    pub country: String,
    /// As-of date used.
    pub date: Date,
    /// Bond maturity.
    pub maturity: Date,
    /// Bond name.
    pub bond_name: String,
    /// Yield in percent, four decimals.
    #[serde(rename = "yield")]
    pub yield_percent: f64,
    /// Bond identifier.
    pub isin: String,
    /// Years from the as-of date to maturity.
    pub year_fraction: f64,
}

/// Reference point and curve for one request, each with its own outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveReport {
    /// Country key.
    pub country: String,
    /// As-of date used.
    pub date: Date,
    /// Benchmark bond, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferencePointOutput>,
    /// Why no benchmark bond was selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_error: Option<ErrorPayload>,
    /// Fitted curve, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<CurveOutput>,
    /// Why no curve is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve_error: Option<ErrorPayload>,
}
