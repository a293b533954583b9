//! Parametric yield curve model.
//!
//! The Nelson-Siegel-Svensson model describes a whole yield curve with six
//! numbers. It is fitted to observed bond yields rather than interpolated
//! point by point.

use serde::Serialize;

use crate::error::{MathError, MathResult};

/// Svensson yield curve model.
///
/// An extension of Nelson-Siegel with an additional hump term:
/// ```text
/// y(t) = β₀ + β₁ * ((1 - e^(-t/τ₁)) / (t/τ₁))
///           + β₂ * ((1 - e^(-t/τ₁)) / (t/τ₁) - e^(-t/τ₁))
///           + β₃ * ((1 - e^(-t/τ₂)) / (t/τ₂) - e^(-t/τ₂))
/// ```
///
/// Where:
/// - β₀: Long-term level (asymptotic yield)
/// - β₁: Short-term component (slope)
/// - β₂: First hump component, decaying at τ₁
/// - β₃: Second hump component, decaying at τ₂
///
/// # Financial Interpretation
///
/// - β₀ + β₁: Instantaneous short rate (as t → 0)
/// - β₂, β₃ > 0: Humps in the curve; < 0: troughs
///
/// Both decay factors are strictly positive; `new` refuses anything else,
/// so a constructed value is always safe to evaluate.
///
/// # Example
///
/// ```rust
/// use sovcurve_math::parametric::Svensson;
///
/// // Create a curve with two humps
/// let sv = Svensson::new(
///     0.045,  // β₀: 4.5% long rate
///     -0.02,  // β₁: upward slope
///     0.01,   // β₂: first hump
///     -0.005, // β₃: second (negative) hump
///     2.0,    // τ₁: 2 years for first hump
///     8.0,    // τ₂: 8 years for second hump
/// ).unwrap();
///
/// let rate = sv.yield_at(5.0).unwrap();
/// assert!(rate > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Svensson {
    /// Long-term level
    beta0: f64,
    /// Short-term component
    beta1: f64,
    /// First hump component
    beta2: f64,
    /// Second hump component
    beta3: f64,
    /// First decay factor
    tau1: f64,
    /// Second decay factor
    tau2: f64,
}

impl Svensson {
    /// Number of free parameters in the model.
    pub const PARAMETER_COUNT: usize = 6;

    /// Creates a new Svensson curve.
    ///
    /// # Arguments
    ///
    /// * `beta0` - Long-term level
    /// * `beta1` - Short-term component
    /// * `beta2` - First hump component
    /// * `beta3` - Second hump component
    /// * `tau1` - First decay factor (must be positive)
    /// * `tau2` - Second decay factor (must be positive)
    ///
    /// # Errors
    ///
    /// Returns an error if either tau is not positive or any parameter is
    /// not finite.
    pub fn new(
        beta0: f64,
        beta1: f64,
        beta2: f64,
        beta3: f64,
        tau1: f64,
        tau2: f64,
    ) -> MathResult<Self> {
        if ![beta0, beta1, beta2, beta3, tau1, tau2]
            .iter()
            .all(|p| p.is_finite())
        {
            return Err(MathError::non_finite("Svensson parameters"));
        }
        if tau1 <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "tau1 must be positive, got {tau1}"
            )));
        }
        if tau2 <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "tau2 must be positive, got {tau2}"
            )));
        }

        Ok(Self {
            beta0,
            beta1,
            beta2,
            beta3,
            tau1,
            tau2,
        })
    }

    /// Creates a curve from a parameter slice ordered (β₀, β₁, β₂, β₃, τ₁, τ₂).
    ///
    /// # Errors
    ///
    /// Returns an error on a slice of the wrong length or invalid parameters.
    pub fn from_slice(params: &[f64]) -> MathResult<Self> {
        match *params {
            [b0, b1, b2, b3, t1, t2] => Self::new(b0, b1, b2, b3, t1, t2),
            _ => Err(MathError::invalid_input(format!(
                "expected {} Svensson parameters, got {}",
                Self::PARAMETER_COUNT,
                params.len()
            ))),
        }
    }

    /// Returns the yield (as a fraction) at maturity `t` in years.
    ///
    /// # Errors
    ///
    /// `t = 0` is a singularity of the loading factors, so any `t <= 0`
    /// or non-finite `t` is rejected.
    pub fn yield_at(&self, t: f64) -> MathResult<f64> {
        if !t.is_finite() || t <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "maturity must be a positive number of years, got {t}"
            )));
        }

        let x1 = t / self.tau1;
        let x2 = t / self.tau2;

        let y = self.beta0
            + self.beta1 * Self::loading_factor_1(x1)
            + self.beta2 * Self::loading_factor_2(x1)
            + self.beta3 * Self::loading_factor_2(x2);

        Ok(y)
    }

    /// Evaluates the curve at every maturity, preserving order.
    ///
    /// # Errors
    ///
    /// Fails on the first maturity `yield_at` rejects.
    pub fn yields(&self, maturities: &[f64]) -> MathResult<Vec<f64>> {
        maturities.iter().map(|&t| self.yield_at(t)).collect()
    }

    /// Returns the model parameters as (β₀, β₁, β₂, β₃, τ₁, τ₂).
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        (
            self.beta0, self.beta1, self.beta2, self.beta3, self.tau1, self.tau2,
        )
    }

    /// Returns the parameters as an array in optimizer order.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.beta0, self.beta1, self.beta2, self.beta3, self.tau1, self.tau2,
        ]
    }

    /// Long-term level β₀.
    pub fn beta0(&self) -> f64 {
        self.beta0
    }

    /// Short-term component β₁.
    pub fn beta1(&self) -> f64 {
        self.beta1
    }

    /// First hump component β₂.
    pub fn beta2(&self) -> f64 {
        self.beta2
    }

    /// Second hump component β₃.
    pub fn beta3(&self) -> f64 {
        self.beta3
    }

    /// First decay factor τ₁.
    pub fn tau1(&self) -> f64 {
        self.tau1
    }

    /// Second decay factor τ₂.
    pub fn tau2(&self) -> f64 {
        self.tau2
    }

    /// Helper function: (1 - e^(-x)) / x
    fn loading_factor_1(x: f64) -> f64 {
        if x.abs() < 1e-10 {
            1.0 - x / 2.0 + x * x / 6.0
        } else {
            (1.0 - (-x).exp()) / x
        }
    }

    /// Helper function: (1 - e^(-x)) / x - e^(-x)
    fn loading_factor_2(x: f64) -> f64 {
        if x.abs() < 1e-10 {
            x / 2.0 - x * x / 3.0
        } else {
            Self::loading_factor_1(x) - (-x).exp()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Svensson {
        Svensson::new(0.045, -0.02, 0.01, -0.005, 2.0, 8.0).unwrap()
    }

    #[test]
    fn test_svensson_asymptotic() {
        // As t → ∞, y(t) → β₀
        let long_rate = sample().yield_at(500.0).unwrap();
        assert_relative_eq!(long_rate, 0.045, epsilon = 0.001);
    }

    #[test]
    fn test_svensson_short_rate() {
        // At t → 0, y(t) → β₀ + β₁
        let short_rate = sample().yield_at(0.001).unwrap();
        assert_relative_eq!(short_rate, 0.045 - 0.02, epsilon = 0.01);
    }

    #[test]
    fn test_svensson_matches_closed_form() {
        let sv = Svensson::new(0.03, -0.02, 0.02, 0.01, 1.5, 3.0).unwrap();
        let t: f64 = 5.0;

        let e1 = (-t / 1.5).exp();
        let e2 = (-t / 3.0).exp();
        let l1 = (1.0 - e1) / (t / 1.5);
        let l2 = (1.0 - e2) / (t / 3.0);
        let expected = 0.03 - 0.02 * l1 + 0.02 * (l1 - e1) + 0.01 * (l2 - e2);

        assert_relative_eq!(sv.yield_at(t).unwrap(), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_svensson_flat_curve() {
        let flat = Svensson::new(0.03, 0.0, 0.0, 0.0, 1.0, 1.0).unwrap();
        for t in [0.25, 1.0, 5.0, 30.0] {
            assert_relative_eq!(flat.yield_at(t).unwrap(), 0.03, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_svensson_two_humps() {
        // β₂ and β₃ with opposite signs can create two humps
        let sv = Svensson::new(0.03, 0.0, 0.02, -0.015, 2.0, 8.0).unwrap();

        let r_1y = sv.yield_at(1.0).unwrap();
        let r_2y = sv.yield_at(2.0).unwrap();
        let r_5y = sv.yield_at(5.0).unwrap();

        assert!(r_2y > r_1y);
        assert!(r_5y < r_2y);
    }

    #[test]
    fn test_svensson_rejects_singular_maturity() {
        let sv = sample();
        assert!(sv.yield_at(0.0).is_err());
        assert!(sv.yield_at(-1.0).is_err());
        assert!(sv.yield_at(f64::NAN).is_err());
        assert!(sv.yield_at(f64::INFINITY).is_err());
    }

    #[test]
    fn test_svensson_tiny_maturity_is_stable() {
        // Taylor branch of the loading factors
        let sv = sample();
        let y = sv.yield_at(1e-12).unwrap();
        assert!(y.is_finite());
        assert_relative_eq!(y, 0.025, epsilon = 1e-9);
    }

    #[test]
    fn test_svensson_invalid_tau() {
        assert!(Svensson::new(0.045, -0.02, 0.01, -0.005, 0.0, 8.0).is_err());
        assert!(Svensson::new(0.045, -0.02, 0.01, -0.005, 2.0, -1.0).is_err());
        assert!(Svensson::new(f64::NAN, -0.02, 0.01, -0.005, 2.0, 8.0).is_err());
    }

    #[test]
    fn test_from_slice() {
        let sv = Svensson::from_slice(&[0.045, -0.02, 0.01, -0.005, 2.0, 8.0]).unwrap();
        assert_eq!(sv, sample());
        assert_eq!(sv.to_array(), [0.045, -0.02, 0.01, -0.005, 2.0, 8.0]);
        assert!(Svensson::from_slice(&[0.045, -0.02]).is_err());
    }

    #[test]
    fn test_yields_preserves_order() {
        let sv = sample();
        let grid = [10.0, 0.5, 3.0];
        let ys = sv.yields(&grid).unwrap();
        assert_eq!(ys.len(), 3);
        for (t, y) in grid.iter().zip(&ys) {
            assert_eq!(sv.yield_at(*t).unwrap(), *y);
        }
        assert!(sv.yields(&[1.0, 0.0]).is_err());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn evaluation_is_pure(t in 0.01f64..50.0) {
                let sv = sample();
                prop_assert_eq!(sv.yield_at(t).unwrap(), sv.yield_at(t).unwrap());
            }

            #[test]
            fn flat_curve_is_flat(level in -0.05f64..0.2, t in 0.01f64..50.0, tau in 0.1f64..10.0) {
                let sv = Svensson::new(level, 0.0, 0.0, 0.0, tau, tau).unwrap();
                prop_assert!((sv.yield_at(t).unwrap() - level).abs() < 1e-14);
            }
        }
    }
}
