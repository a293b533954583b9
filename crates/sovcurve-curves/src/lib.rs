//! # Sovcurve Curves
//!
//! Sovereign yield curve construction from observed bond quotes.
//!
//! This crate provides:
//!
//! - **Filter**: selects the usable quotes of one country on one date
//! - **Calibration**: global Svensson fit by Levenberg-Marquardt
//! - **Evaluation**: yields on the standard tenor grid or at any maturity
//! - **Reference**: the benchmark bond closest to a target tenor
//! - **Display**: presentation rounding, applied once at the boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use sovcurve_core::types::{Date, Instrument};
//! use sovcurve_curves::prelude::*;
//!
//! let as_of = Date::from_ymd(2025, 1, 1).unwrap();
//! let bonds: Vec<Instrument> = [(2026, 0.015), (2028, 0.022), (2030, 0.028), (2035, 0.035), (2045, 0.042)]
//!     .iter()
//!     .map(|&(year, y)| {
//!         let maturity = Date::from_ymd(year, 1, 1).ok();
//!         Instrument::new(format!("TL{year}"), format!("Testland {year}"), "Testland", maturity, Some(y))
//!     })
//!     .collect();
//!
//! let usable = InstrumentFilter::default().filter(&bonds, "Testland", as_of);
//! let benchmark = closest_to_target(&usable, DEFAULT_TARGET_YEARS).unwrap();
//! assert_eq!(benchmark.instrument.id, "TL2035");
//!
//! let fit = SvenssonFitter::default().fit(&usable).unwrap();
//! let grid = evaluate_grid(&fit.curve, &STANDARD_GRID).unwrap();
//! assert_eq!(grid.len(), 15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod calibration;
pub mod display;
pub mod error;
pub mod evaluation;
pub mod filter;
pub mod reference;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calibration::{FitResult, FitterConfig, SvenssonFitter};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::evaluation::{
        evaluate, evaluate_grid, evaluate_one, evaluate_specific, parse_maturity, CurvePoint,
        Tenor, TenorYield, STANDARD_GRID,
    };
    pub use crate::filter::{FilterConfig, FilteredInstrument, InstrumentFilter};
    pub use crate::reference::{closest_to_target, DEFAULT_TARGET_YEARS};
}

pub use error::{CurveError, CurveResult};
