//! Svensson curve fitting using Levenberg-Marquardt.
//!
//! # Example
//!
//! ```rust
//! use sovcurve_curves::calibration::SvenssonFitter;
//!
//! let points = [(0.5, 0.021), (1.0, 0.023), (2.0, 0.026), (5.0, 0.031), (10.0, 0.034), (20.0, 0.036)];
//!
//! let result = SvenssonFitter::default().fit_points(&points).unwrap();
//! println!("{}", result.summary());
//! assert!(result.rms_error < 1e-3);
//! ```

use serde::{Deserialize, Serialize};
use sovcurve_math::optimization::{
    LevenbergMarquardt, LevenbergMarquardtConfig, Termination,
};
use sovcurve_math::parametric::Svensson;

use crate::error::{CurveError, CurveResult};
use crate::filter::FilteredInstrument;

/// Starting point (β₀, β₁, β₂, β₃, τ₁, τ₂) for the optimizer.
///
/// A 3% level with an upward slope and two small humps. Both decay factors
/// are positive and every filtered maturity exceeds 0.25 years, so the
/// seed never sits on the t/τ = 0 singularity.
pub const DEFAULT_INITIAL_GUESS: [f64; 6] = [0.03, -0.02, 0.02, 0.01, 1.5, 3.0];

/// Configuration for the Svensson fitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitterConfig {
    /// Fewer usable instruments than this fails without optimizing.
    pub min_instruments: usize,
    /// Residual function evaluations allowed per fit.
    pub max_function_evaluations: usize,
    /// Relative cost and parameter-step tolerance, the MINPACK default.
    pub tolerance: f64,
    /// Optimizer seed (β₀, β₁, β₂, β₃, τ₁, τ₂).
    pub initial_guess: [f64; 6],
}

impl Default for FitterConfig {
    fn default() -> Self {
        Self {
            min_instruments: 4,
            max_function_evaluations: 10_000,
            tolerance: 1.49e-8,
            initial_guess: DEFAULT_INITIAL_GUESS,
        }
    }
}

impl FitterConfig {
    /// Creates a new configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the function evaluation budget.
    #[must_use]
    pub fn with_max_function_evaluations(mut self, max: usize) -> Self {
        self.max_function_evaluations = max;
        self
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the optimizer seed.
    #[must_use]
    pub fn with_initial_guess(mut self, guess: [f64; 6]) -> Self {
        self.initial_guess = guess;
        self
    }

    fn solver_config(&self) -> LevenbergMarquardtConfig {
        LevenbergMarquardtConfig::default()
            .with_max_function_evaluations(self.max_function_evaluations)
            .with_tolerance(self.tolerance)
    }
}

/// Result of a Svensson fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Fitted curve.
    pub curve: Svensson,
    /// Fitted minus observed yield, per instrument, in input order.
    pub residuals: Vec<f64>,
    /// Root mean square of the residuals.
    pub rms_error: f64,
    /// Optimizer iterations.
    pub iterations: usize,
    /// Residual function evaluations.
    pub function_evaluations: usize,
    /// Why the optimizer stopped.
    pub termination: Termination,
}

impl FitResult {
    /// Returns the maximum absolute error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.residuals.iter().map(|r| r.abs()).fold(0.0, f64::max)
    }

    /// Returns errors in basis points.
    #[must_use]
    pub fn errors_bps(&self) -> Vec<f64> {
        self.residuals.iter().map(|r| r * 10_000.0).collect()
    }

    /// One-line description of fit quality.
    pub fn summary(&self) -> String {
        format!(
            "Svensson fit ({}): {} points, {} iterations, {} evaluations, RMS={:.4}bp, Max={:.4}bp",
            self.termination,
            self.residuals.len(),
            self.iterations,
            self.function_evaluations,
            self.rms_error * 10_000.0,
            self.max_error() * 10_000.0
        )
    }
}

/// Fits a Svensson curve to observed yields by nonlinear least squares.
///
/// Minimizes Σ (observed − y(t; β₀, β₁, β₂, β₃, τ₁, τ₂))² within a fixed
/// evaluation budget. Trial points with a non-positive decay factor are
/// rejected by the model and never accepted by the optimizer.
#[derive(Debug, Clone, Default)]
pub struct SvenssonFitter {
    config: FitterConfig,
}

impl SvenssonFitter {
    /// Creates a fitter with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fitter with the given configuration.
    #[must_use]
    pub fn with_config(config: FitterConfig) -> Self {
        Self { config }
    }

    /// Returns the fitter configuration.
    pub fn config(&self) -> &FitterConfig {
        &self.config
    }

    /// Fits the curve to filtered instruments.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` with fewer than `min_instruments` instruments;
    ///   the optimizer is not run
    /// - `FitError` when the optimizer fails or exhausts its budget
    pub fn fit(&self, instruments: &[FilteredInstrument<'_>]) -> CurveResult<FitResult> {
        let points: Vec<(f64, f64)> = instruments
            .iter()
            .map(|f| (f.year_fraction, f.yield_value))
            .collect();
        self.fit_points(&points)
    }

    /// Fits the curve to `(years, yield)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`SvenssonFitter::fit`].
    pub fn fit_points(&self, points: &[(f64, f64)]) -> CurveResult<FitResult> {
        if points.len() < self.config.min_instruments {
            return Err(CurveError::insufficient_data(
                self.config.min_instruments,
                points.len(),
            ));
        }

        // Validate the seed up front so a bad config reads as such
        Svensson::from_slice(&self.config.initial_guess)?;

        let solver = LevenbergMarquardt::new(self.config.solver_config());
        let solution = solver.minimize(
            |params| {
                let curve = Svensson::from_slice(params)?;
                points
                    .iter()
                    .map(|&(t, observed)| curve.yield_at(t).map(|y| y - observed))
                    .collect()
            },
            &self.config.initial_guess,
        )?;

        let curve = Svensson::from_slice(&solution.parameters)?;
        let rms_error = solution.rms();

        Ok(FitResult {
            curve,
            residuals: solution.residuals,
            rms_error,
            iterations: solution.iterations,
            function_evaluations: solution.function_evaluations,
            termination: solution.termination,
        })
    }
}
