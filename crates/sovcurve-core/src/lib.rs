//! # Sovcurve Core
//!
//! Core types and abstractions shared by every Sovcurve crate.
//!
//! This crate provides:
//!
//! - **Types**: `Date` and the observed bond quote, `Instrument`
//! - **Day Count Conventions**: ACT/365 Fixed year fractions
//! - **Traits**: `InstrumentSource`, the read-only snapshot the curve
//!   fitting core consumes
//!
//! ## Example
//!
//! ```rust
//! use sovcurve_core::prelude::*;
//!
//! let as_of = Date::parse("2025-01-01").unwrap();
//! let maturity = Date::from_ymd(2035, 1, 1).unwrap();
//! let t = Act365Fixed.year_fraction(as_of, maturity);
//! assert!(t > 10.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod daycounts;
pub mod error;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{Act365Fixed, DayCount};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::traits::InstrumentSource;
    pub use crate::types::{Date, Instrument};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, Instrument};
