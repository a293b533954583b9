//! Benchmark bond selection.
//!
//! Picks the observed bond whose time to maturity is closest to a target
//! tenor. It works on the filtered set alone and does not depend on a
//! successful fit.

use crate::error::{CurveError, CurveResult};
use crate::filter::FilteredInstrument;

/// Default benchmark tenor in years.
pub const DEFAULT_TARGET_YEARS: f64 = 10.0;

/// Returns the instrument minimizing `|year_fraction - target_years|`.
///
/// Ties go to the earlier instrument in input order.
///
/// # Errors
///
/// `EmptyInput` when `instruments` is empty.
pub fn closest_to_target<'s, 'a>(
    instruments: &'s [FilteredInstrument<'a>],
    target_years: f64,
) -> CurveResult<&'s FilteredInstrument<'a>> {
    instruments
        .iter()
        .min_by(|a, b| {
            let da = (a.year_fraction - target_years).abs();
            let db = (b.year_fraction - target_years).abs();
            da.total_cmp(&db)
        })
        .ok_or(CurveError::EmptyInput)
}
