//! Curve evaluation on a tenor grid and at user-requested maturities.

use serde::Serialize;
use sovcurve_math::parametric::Svensson;

use crate::display::{to_percent, YIELD_PERCENT_DP};
use crate::error::{CurveError, CurveResult};

/// A labelled maturity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tenor {
    /// Market label, e.g. "3M".
    pub label: &'static str,
    /// Maturity in years.
    pub years: f64,
}

impl Tenor {
    const fn new(label: &'static str, years: f64) -> Self {
        Self { label, years }
    }
}

/// Canonical reporting grid, shortest first.
pub const STANDARD_GRID: [Tenor; 15] = [
    Tenor::new("1M", 1.0 / 12.0),
    Tenor::new("3M", 0.25),
    Tenor::new("6M", 0.5),
    Tenor::new("1Y", 1.0),
    Tenor::new("2Y", 2.0),
    Tenor::new("3Y", 3.0),
    Tenor::new("4Y", 4.0),
    Tenor::new("5Y", 5.0),
    Tenor::new("6Y", 6.0),
    Tenor::new("7Y", 7.0),
    Tenor::new("8Y", 8.0),
    Tenor::new("9Y", 9.0),
    Tenor::new("10Y", 10.0),
    Tenor::new("15Y", 15.0),
    Tenor::new("20Y", 20.0),
];

/// A (maturity, yield) pair in model units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// Maturity in years.
    pub maturity: f64,
    /// Yield as a fraction.
    #[serde(rename = "yield")]
    pub yield_value: f64,
}

/// A grid yield ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenorYield {
    /// Tenor label.
    pub tenor: &'static str,
    /// Yield in percent, rounded to three decimals.
    #[serde(rename = "yield")]
    pub yield_percent: f64,
}

/// Evaluates the curve at each maturity, preserving order.
///
/// # Errors
///
/// `InvalidMaturity` for the first maturity that is not finite and positive.
pub fn evaluate(curve: &Svensson, maturities: &[f64]) -> CurveResult<Vec<CurvePoint>> {
    maturities
        .iter()
        .map(|&maturity| {
            let yield_value = model_yield(curve, maturity)?;
            Ok(CurvePoint {
                maturity,
                yield_value,
            })
        })
        .collect()
}

/// Evaluates the curve on a tenor grid, in percent rounded to three decimals.
///
/// # Errors
///
/// `InvalidMaturity` if the grid holds a non-positive tenor.
pub fn evaluate_grid(curve: &Svensson, grid: &[Tenor]) -> CurveResult<Vec<TenorYield>> {
    grid.iter()
        .map(|tenor| {
            Ok(TenorYield {
                tenor: tenor.label,
                yield_percent: evaluate_one(curve, tenor.years)?,
            })
        })
        .collect()
}

/// Yield at `years`, in percent rounded to three decimals.
///
/// Any positive maturity is accepted, including ones shorter than the
/// filter's cutoff; that cutoff applies to input quotes only.
///
/// # Errors
///
/// `InvalidMaturity` if `years` is not finite and positive.
pub fn evaluate_one(curve: &Svensson, years: f64) -> CurveResult<f64> {
    model_yield(curve, years).map(|y| to_percent(y, YIELD_PERCENT_DP))
}

/// Parses a free-form maturity such as `"7"`, `" 2.5 "` or `"1e1"`.
///
/// # Errors
///
/// `InvalidMaturity` if the text is not a number, or is not finite and
/// positive.
pub fn parse_maturity(input: &str) -> CurveResult<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite() && *t > 0.0)
        .ok_or_else(|| CurveError::invalid_maturity(input))
}

/// Parses `input` and evaluates the curve there, in percent.
///
/// # Errors
///
/// `InvalidMaturity` as for [`parse_maturity`].
pub fn evaluate_specific(curve: &Svensson, input: &str) -> CurveResult<f64> {
    evaluate_one(curve, parse_maturity(input)?)
}

fn model_yield(curve: &Svensson, years: f64) -> CurveResult<f64> {
    if !years.is_finite() || years <= 0.0 {
        return Err(CurveError::invalid_maturity(years.to_string()));
    }
    Ok(curve.yield_at(years)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_three_percent() -> Svensson {
        Svensson::new(0.03, 0.0, 0.0, 0.0, 1.0, 1.0).unwrap()
    }

    #[test]
    fn test_standard_grid() {
        let labels: Vec<&str> = STANDARD_GRID.iter().map(|t| t.label).collect();
        assert_eq!(
            labels,
            vec!["1M", "3M", "6M", "1Y", "2Y", "3Y", "4Y", "5Y", "6Y", "7Y", "8Y", "9Y", "10Y", "15Y", "20Y"]
        );
        assert_relative_eq!(STANDARD_GRID[0].years, 1.0 / 12.0);
        assert!(STANDARD_GRID.windows(2).all(|w| w[0].years < w[1].years));
    }

    #[test]
    fn test_evaluate_one_flat() {
        assert_eq!(evaluate_one(&flat_three_percent(), 5.0).unwrap(), 3.0);
    }

    #[test]
    fn test_evaluate_one_boundaries() {
        let curve = flat_three_percent();
        assert!(matches!(
            evaluate_one(&curve, 0.0),
            Err(CurveError::InvalidMaturity { .. })
        ));
        assert!(matches!(
            evaluate_one(&curve, -2.0),
            Err(CurveError::InvalidMaturity { .. })
        ));
        assert_eq!(evaluate_one(&curve, 0.25).unwrap(), 3.0);
    }

    #[test]
    fn test_evaluate_grid_preserves_order() {
        let curve = Svensson::new(0.04, -0.02, 0.01, 0.0, 2.0, 5.0).unwrap();
        let grid = evaluate_grid(&curve, &STANDARD_GRID).unwrap();

        assert_eq!(grid.len(), 15);
        assert_eq!(grid[0].tenor, "1M");
        assert_eq!(grid[14].tenor, "20Y");
        // Upward sloping
        assert!(grid[0].yield_percent < grid[14].yield_percent);
    }

    #[test]
    fn test_evaluate_points() {
        let curve = flat_three_percent();
        let points = evaluate(&curve, &[10.0, 1.0]).unwrap();
        assert_eq!(points[0].maturity, 10.0);
        assert_eq!(points[1].maturity, 1.0);
        assert_relative_eq!(points[0].yield_value, 0.03);
        assert!(evaluate(&curve, &[1.0, 0.0]).is_err());
    }

    #[test]
    fn test_parse_maturity() {
        assert_eq!(parse_maturity("7").unwrap(), 7.0);
        assert_eq!(parse_maturity(" 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_maturity("1e1").unwrap(), 10.0);

        for bad in ["", "abc", "0", "-1", "inf", "NaN", "5y"] {
            assert_eq!(
                parse_maturity(bad).unwrap_err(),
                CurveError::invalid_maturity(bad)
            );
        }
    }

    #[test]
    fn test_evaluate_specific() {
        let curve = flat_three_percent();
        assert_eq!(evaluate_specific(&curve, "5").unwrap(), 3.0);
        assert!(evaluate_specific(&curve, "five").is_err());
    }

    #[test]
    fn test_tenor_yield_serializes_as_yield() {
        let json = serde_json::to_value(TenorYield {
            tenor: "10Y",
            yield_percent: 3.25,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"tenor": "10Y", "yield": 3.25}));
    }
}
