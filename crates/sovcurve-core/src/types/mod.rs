//! Domain types.

mod date;
mod instrument;

pub use date::Date;
pub use instrument::Instrument;
