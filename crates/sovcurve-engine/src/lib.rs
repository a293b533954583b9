//! # Sovcurve Engine
//!
//! Request orchestration for the sovereign curve service.
//!
//! This crate provides:
//! - [`CurveService`]: validates requests and runs filter, fit and selection
//! - [`EngineConfig`]: thresholds and solver settings, loadable from TOML
//! - [`EngineError`] / [`ErrorKind`]: typed failures with status classes
//!
//! ## Architecture
//!
//! ```text
//! InstrumentSource ─> InstrumentFilter ─┬─> SvenssonFitter ─> grid / specific yields
//!                                       │
//!                                       └─> closest_to_target ─> reference point
//! ```
//!
//! The two branches share the filtered set and nothing else; either can
//! fail without affecting the other.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod output;
pub mod service;

// Re-exports
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult, ErrorKind, ErrorPayload};
pub use output::{
    CurveOutput, CurveReport, CurveRequest, FitDiagnostics, ReferencePointOutput, SpecificYield,
    SvenssonParameters,
};
pub use service::CurveService;
