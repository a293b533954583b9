//! # Sovcurve Ext File
//!
//! File-based bond quote snapshots for the Sovcurve curve service.
//!
//! This crate provides the default [`InstrumentSource`] implementations:
//! - CSV snapshot source for end-of-day loads
//! - In-memory source for tests and embedding
//!
//! [`InstrumentSource`]: sovcurve_core::traits::InstrumentSource

#![warn(missing_docs)]
#![warn(clippy::all)]

mod csv_source;
mod error;
mod memory;

pub use csv_source::*;
pub use error::*;
pub use memory::*;
