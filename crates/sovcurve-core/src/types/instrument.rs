//! Observed sovereign bond quote.

use serde::{Deserialize, Serialize};

use super::Date;

/// One observed bond quote from a market data snapshot.
///
/// Maturity and yield are optional because snapshots routinely carry
/// perpetuals, unparseable dates and missing quotes. Yields are fractions
/// (`0.031` for 3.1%), never percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Opaque identifier (usually the ISIN).
    pub id: String,
    /// Issue or display name.
    pub name: String,
    /// Country key, matched case-sensitively.
    pub country: String,
    /// Maturity date, if present and parseable.
    pub maturity: Option<Date>,
    /// Observed yield as a fraction, if quoted.
    #[serde(rename = "yield")]
    pub yield_value: Option<f64>,
}

impl Instrument {
    /// Creates a new instrument record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
        maturity: Option<Date>,
        yield_value: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            maturity,
            yield_value,
        }
    }

    /// Returns the maturity and yield when both are present.
    ///
    /// A non-finite yield (NaN or infinite) counts as absent.
    pub fn quote(&self) -> Option<(Date, f64)> {
        let maturity = self.maturity?;
        let yield_value = self.yield_value.filter(|y| y.is_finite())?;
        Some((maturity, yield_value))
    }
}
