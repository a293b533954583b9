//! Optimization algorithms.
//!
//! This module provides the nonlinear least-squares solver used for
//! parametric curve fitting.

mod levenberg_marquardt;

pub use levenberg_marquardt::LevenbergMarquardt;

use std::fmt;

/// Configuration for the Levenberg-Marquardt solver.
///
/// The evaluation budget counts every call of the residual function,
/// including the ones spent on finite-difference Jacobians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevenbergMarquardtConfig {
    /// Hard cap on residual function evaluations.
    pub max_function_evaluations: usize,
    /// Stop once the root mean square residual falls to this level.
    pub residual_tolerance: f64,
    /// Stop when both the actual and the predicted relative cost reduction
    /// of an accepted step fall below this fraction.
    pub function_tolerance: f64,
    /// Stop when an accepted step is this small relative to the parameters.
    pub parameter_tolerance: f64,
    /// Stop when the cosine between the residual vector and every Jacobian
    /// column falls to this level.
    pub gradient_tolerance: f64,
    /// Accepted steps over which progress is measured for stall detection.
    /// Zero disables it.
    pub stall_iterations: usize,
    /// Stalled when the RMS residual improves by less than this fraction
    /// over the stall window.
    pub stall_tolerance: f64,
    /// Stalled when the RMS residual improves by less than this fraction of
    /// the starting RMS over the stall window.
    pub stall_floor: f64,
    /// Initial damping factor.
    pub initial_lambda: f64,
    /// Factor to increase lambda on a rejected step.
    pub lambda_up: f64,
    /// Factor to decrease lambda on an accepted step.
    pub lambda_down: f64,
    /// Minimum damping factor.
    pub min_lambda: f64,
    /// Damping beyond which no downhill step is considered to exist.
    pub max_lambda: f64,
    /// Relative step for forward-difference derivatives.
    pub finite_difference_step: f64,
}

impl Default for LevenbergMarquardtConfig {
    fn default() -> Self {
        Self {
            max_function_evaluations: 10_000,
            residual_tolerance: 1e-10,
            function_tolerance: 1.49e-8,
            parameter_tolerance: 1.49e-8,
            gradient_tolerance: 1e-10,
            stall_iterations: 10,
            stall_tolerance: 3e-3,
            stall_floor: 1e-5,
            initial_lambda: 1e-3,
            lambda_up: 10.0,
            lambda_down: 0.1,
            min_lambda: 1e-12,
            max_lambda: 1e12,
            finite_difference_step: 1.5e-8,
        }
    }
}

impl LevenbergMarquardtConfig {
    /// Creates a configuration with default settings.
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

    /// Sets the function and parameter tolerances together.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.function_tolerance = tolerance;
        self.parameter_tolerance = tolerance;
        self
    }
}

/// Why the solver stopped.
///
/// Every variant is a successful stop. Running out of budget is an error,
/// not a termination reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// RMS residual reached the residual tolerance.
    ResidualTolerance,
    /// Relative cost reduction fell below the function tolerance.
    FunctionTolerance,
    /// Parameter step fell below the parameter tolerance.
    ParameterTolerance,
    /// Gradient fell below the gradient tolerance.
    GradientTolerance,
    /// RMS residual stopped improving over the stall window.
    Stalled,
    /// No downhill step exists even under maximum damping.
    Stationary,
}

impl Termination {
    /// Short machine-friendly name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResidualTolerance => "residual_tolerance",
            Self::FunctionTolerance => "function_tolerance",
            Self::ParameterTolerance => "parameter_tolerance",
            Self::GradientTolerance => "gradient_tolerance",
            Self::Stalled => "stalled",
            Self::Stationary => "stationary",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a least-squares solve.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresResult {
    /// Parameters at the best point found.
    pub parameters: Vec<f64>,
    /// Residuals at those parameters.
    pub residuals: Vec<f64>,
    /// Sum of squared residuals.
    pub cost: f64,
    /// Outer iterations (Jacobian evaluations) performed.
    pub iterations: usize,
    /// Residual function evaluations performed.
    pub function_evaluations: usize,
    /// Why the solver stopped.
    pub termination: Termination,
}

impl LeastSquaresResult {
    /// Root mean square of the residuals.
    pub fn rms(&self) -> f64 {
        if self.residuals.is_empty() {
            return 0.0;
        }
        (self.cost / self.residuals.len() as f64).sqrt()
    }

    /// Largest absolute residual.
    pub fn max_abs_residual(&self) -> f64 {
        self.residuals.iter().fold(0.0_f64, |acc, r| acc.max(r.abs()))
    }
}
