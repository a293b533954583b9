//! Levenberg-Marquardt nonlinear least squares.
//!
//! Each iteration solves the damped normal equations
//!
//! ```text
//! (JᵀJ + λ·diag(JᵀJ)) δ = -Jᵀr
//! ```
//!
//! with a forward-difference Jacobian `J`. Trial points where the residual
//! function fails or returns non-finite values are treated as uphill steps,
//! which lets models with constrained parameters (positive decay factors,
//! for instance) reject infeasible moves without special casing.
//!
//! Stopping follows MINPACK: an RMS residual floor, relative function and
//! parameter tolerances (the function test needs both the actual and the
//! predicted reduction to be small), and a scale-free gradient test. A stall
//! test ends slow crawls along flat valleys.

use nalgebra::{DMatrix, DVector};

use super::{LeastSquaresResult, LevenbergMarquardtConfig, Termination};
use crate::error::{MathError, MathResult};

/// Floor for diagonal scaling so parameters with no influence stay damped.
const DIAGONAL_FLOOR: f64 = 1e-12;

/// Levenberg-Marquardt solver.
///
/// # Example
///
/// ```rust
/// use sovcurve_math::optimization::{LevenbergMarquardt, LevenbergMarquardtConfig};
///
/// let xs = [0.0, 1.0, 2.0, 3.0];
/// let ys = [1.0, 3.0, 5.0, 7.0];
///
/// let solver = LevenbergMarquardt::new(LevenbergMarquardtConfig::default());
/// let result = solver
///     .minimize(
///         |p: &[f64]| Ok(xs.iter().zip(&ys).map(|(x, y)| p[0] + p[1] * x - y).collect()),
///         &[0.0, 0.0],
///     )
///     .unwrap();
///
/// assert!((result.parameters[0] - 1.0).abs() < 1e-6);
/// assert!((result.parameters[1] - 2.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LevenbergMarquardt {
    config: LevenbergMarquardtConfig,
}

impl LevenbergMarquardt {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: LevenbergMarquardtConfig) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &LevenbergMarquardtConfig {
        &self.config
    }

    /// Minimizes the sum of squared residuals starting from `initial`.
    ///
    /// # Errors
    ///
    /// - `BudgetExhausted` when no termination criterion is met within the
    ///   function evaluation budget
    /// - `SingularMatrix` when the damped normal equations cannot be solved
    /// - `NonFinite` when the starting point or a Jacobian column is not finite
    /// - any error the residual function returns at the starting point
    pub fn minimize<F>(&self, residuals: F, initial: &[f64]) -> MathResult<LeastSquaresResult>
    where
        F: Fn(&[f64]) -> MathResult<Vec<f64>>,
    {
        let cfg = &self.config;
        let n = initial.len();
        if n == 0 {
            return Err(MathError::invalid_input("no parameters to optimize"));
        }

        let mut evaluations = 1;
        let mut x = DVector::from_column_slice(initial);
        let mut r = DVector::from_vec(residuals(x.as_slice())?);
        let m = r.len();
        if m == 0 {
            return Err(MathError::insufficient_data(1, 0));
        }
        if !r.iter().all(|v| v.is_finite()) {
            return Err(MathError::non_finite("residuals at starting point"));
        }

        let mut cost = r.norm_squared();
        let mut lambda = cfg.initial_lambda;
        let mut iterations = 0;

        let rms_of = |cost: f64| (cost / m as f64).sqrt();
        let initial_rms = rms_of(cost);
        let mut rms_history = vec![initial_rms];

        let termination = 'outer: loop {
            if rms_of(cost) <= cfg.residual_tolerance {
                break Termination::ResidualTolerance;
            }

            if evaluations + n > cfg.max_function_evaluations {
                return Err(self.exhausted(evaluations, iterations, cost));
            }
            let jac = self.jacobian(&residuals, &x, &r, &mut evaluations)?;
            iterations += 1;

            let jtj = jac.transpose() * &jac;
            let gradient = jac.transpose() * &r;
            if max_cosine(&jtj, &gradient, cost.sqrt()) <= cfg.gradient_tolerance {
                break Termination::GradientTolerance;
            }
            let rhs = -&gradient;

            loop {
                if lambda > cfg.max_lambda {
                    break 'outer Termination::Stationary;
                }
                if evaluations >= cfg.max_function_evaluations {
                    return Err(self.exhausted(evaluations, iterations, cost));
                }

                let mut damped = jtj.clone();
                for i in 0..n {
                    damped[(i, i)] += lambda * jtj[(i, i)].max(DIAGONAL_FLOOR);
                }
                let step = damped.lu().solve(&rhs).ok_or(MathError::SingularMatrix)?;

                let candidate = &x + &step;
                evaluations += 1;
                let trial = residuals(candidate.as_slice())
                    .ok()
                    .filter(|t| t.len() == m && t.iter().all(|v| v.is_finite()))
                    .map(DVector::from_vec);

                if let Some(trial) = trial {
                    let trial_cost = trial.norm_squared();
                    if trial_cost < cost {
                        let actual = (cost - trial_cost) / cost;
                        let linearized = (&r + &jac * &step).norm_squared();
                        let predicted = ((cost - linearized) / cost).max(0.0);
                        let step_norm = step.norm();

                        x = candidate;
                        r = trial;
                        cost = trial_cost;
                        lambda = (lambda * cfg.lambda_down).max(cfg.min_lambda);

                        let xtol = cfg.parameter_tolerance;
                        if step_norm <= xtol * (x.norm() + xtol) {
                            break 'outer Termination::ParameterTolerance;
                        }
                        if actual <= cfg.function_tolerance && predicted <= cfg.function_tolerance {
                            break 'outer Termination::FunctionTolerance;
                        }

                        let rms = rms_of(cost);
                        rms_history.push(rms);
                        if cfg.stall_iterations > 0 && rms_history.len() > cfg.stall_iterations {
                            let earlier = rms_history[rms_history.len() - 1 - cfg.stall_iterations];
                            let threshold = (cfg.stall_tolerance * earlier)
                                .max(cfg.stall_floor * initial_rms);
                            if earlier - rms <= threshold {
                                break 'outer Termination::Stalled;
                            }
                        }
                        continue 'outer;
                    }
                }

                lambda *= cfg.lambda_up;
            }
        };

        log::debug!(
            "Levenberg-Marquardt stopped ({termination}) after {iterations} iterations, \
             {evaluations} evaluations, cost {cost:.3e}"
        );

        Ok(LeastSquaresResult {
            parameters: x.iter().copied().collect(),
            residuals: r.iter().copied().collect(),
            cost,
            iterations,
            function_evaluations: evaluations,
            termination,
        })
    }

    /// Forward-difference Jacobian. Steps are always positive so a parameter
    /// bounded below stays on its feasible side.
    fn jacobian<F>(
        &self,
        residuals: &F,
        x: &DVector<f64>,
        r: &DVector<f64>,
        evaluations: &mut usize,
    ) -> MathResult<DMatrix<f64>>
    where
        F: Fn(&[f64]) -> MathResult<Vec<f64>>,
    {
        let m = r.len();
        let n = x.len();
        let mut jac = DMatrix::zeros(m, n);

        for j in 0..n {
            let h = self.config.finite_difference_step * x[j].abs().max(1.0);
            let mut shifted = x.clone();
            shifted[j] += h;

            *evaluations += 1;
            let bumped = residuals(shifted.as_slice())?;
            if bumped.len() != m {
                return Err(MathError::invalid_input(format!(
                    "residual count changed from {m} to {}",
                    bumped.len()
                )));
            }

            for (i, (b, base)) in bumped.iter().zip(r.iter()).enumerate() {
                let d = (b - base) / h;
                if !d.is_finite() {
                    return Err(MathError::non_finite("finite-difference Jacobian"));
                }
                jac[(i, j)] = d;
            }
        }

        Ok(jac)
    }

    fn exhausted(&self, evaluations: usize, iterations: usize, cost: f64) -> MathError {
        log::debug!(
            "Levenberg-Marquardt budget of {} evaluations exhausted at cost {cost:.3e}",
            self.config.max_function_evaluations
        );
        MathError::BudgetExhausted {
            evaluations,
            iterations,
            residual: cost,
        }
    }
}

/// Largest cosine between the residual vector and a Jacobian column, read
/// off `JᵀJ` and `Jᵀr`. Columns with no influence are skipped.
fn max_cosine(jtj: &DMatrix<f64>, gradient: &DVector<f64>, residual_norm: f64) -> f64 {
    if residual_norm == 0.0 {
        return 0.0;
    }
    gradient
        .iter()
        .enumerate()
        .filter(|&(j, _)| jtj[(j, j)] > 0.0)
        .map(|(j, g)| g.abs() / (jtj[(j, j)].sqrt() * residual_norm))
        .fold(0.0, f64::max)
}
