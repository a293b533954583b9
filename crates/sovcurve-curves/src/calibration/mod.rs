//! Curve calibration.
//!
//! Fits the six Svensson parameters to observed yields in a single global
//! least-squares solve. There is no bootstrap: every instrument constrains
//! the whole curve at once.

mod svensson_fit;

pub use svensson_fit::{FitResult, FitterConfig, SvenssonFitter, DEFAULT_INITIAL_GUESS};
