//! # Sovcurve Math
//!
//! Mathematical utilities for the Sovcurve yield curve library.
//!
//! This crate provides:
//!
//! - **Parametric models**: the Nelson-Siegel-Svensson yield function
//! - **Optimization**: Levenberg-Marquardt nonlinear least squares with a
//!   hard function-evaluation budget
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Careful handling of edge cases
//! - **Bounded Work**: Every iterative routine terminates within its budget

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod optimization;
pub mod parametric;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::optimization::{
        LeastSquaresResult, LevenbergMarquardt, LevenbergMarquardtConfig, Termination,
    };
    pub use crate::parametric::Svensson;
}

pub use error::{MathError, MathResult};
