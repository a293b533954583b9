//! Instrument selection for curve construction.
//!
//! Raw snapshots mix countries, carry perpetuals and unparseable dates, and
//! occasionally quote yields in the wrong unit. The filter keeps only the
//! quotes usable for fitting and attaches each one's time to maturity.

use serde::{Deserialize, Serialize};
use sovcurve_core::daycounts::{Act365Fixed, DayCount};
use sovcurve_core::types::{Date, Instrument};

/// Filtering thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Quotes above this yield (a fraction, 1.0 = 100%) are rejected.
    pub max_yield: f64,
    /// Quotes maturing within this many years are rejected.
    pub min_year_fraction: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_yield: 1.0,
            min_year_fraction: 0.25,
        }
    }
}

/// An instrument that passed the filter.
///
/// Invariant: `year_fraction > min_year_fraction` and
/// `yield_value <= max_yield` for the config that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredInstrument<'a> {
    /// The source record.
    pub instrument: &'a Instrument,
    /// Maturity date.
    pub maturity: Date,
    /// Observed yield as a fraction.
    pub yield_value: f64,
    /// ACT/365F years from the as-of date to maturity.
    pub year_fraction: f64,
}

/// Selects the instruments of one country usable on one date.
#[derive(Debug, Clone, Default)]
pub struct InstrumentFilter {
    config: FilterConfig,
    day_count: Act365Fixed,
}

impl InstrumentFilter {
    /// Creates a filter with the given thresholds.
    #[must_use]
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            day_count: Act365Fixed,
        }
    }

    /// Returns the filter thresholds.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Keeps instruments of `country` (exact match) that have both a
    /// maturity and a finite yield, mature more than `min_year_fraction` years
    /// after `as_of`, and yield at most `max_yield`.
    ///
    /// Input order is preserved. No match is an empty result, not an error.
    pub fn filter<'a>(
        &self,
        instruments: &'a [Instrument],
        country: &str,
        as_of: Date,
    ) -> Vec<FilteredInstrument<'a>> {
        instruments
            .iter()
            .filter(|inst| inst.country == country)
            .filter_map(|inst| {
                let (maturity, yield_value) = inst.quote()?;
                let year_fraction = self.day_count.year_fraction(as_of, maturity);
                (year_fraction > self.config.min_year_fraction
                    && yield_value <= self.config.max_yield)
                    .then_some(FilteredInstrument {
                        instrument: inst,
                        maturity,
                        yield_value,
                        year_fraction,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn bond(id: &str, country: &str, maturity: Option<&str>, y: Option<f64>) -> Instrument {
        Instrument::new(id, format!("{id} bond"), country, maturity.map(date), y)
    }

    #[test]
    fn test_filter_rules() {
        let as_of = date("2025-01-01");
        let data = vec![
            bond("OK1", "Testland", Some("2030-01-01"), Some(0.03)),
            bond("OTHER", "Otherland", Some("2030-01-01"), Some(0.03)),
            bond("CASE", "testland", Some("2030-01-01"), Some(0.03)),
            bond("NOMAT", "Testland", None, Some(0.03)),
            bond("NOYLD", "Testland", Some("2030-01-01"), None),
            bond("SHORT", "Testland", Some("2025-02-01"), Some(0.02)),
            bond("PCT", "Testland", Some("2030-01-01"), Some(3.1)),
            bond("CAP", "Testland", Some("2031-01-01"), Some(1.0)),
            bond("OK2", "Testland", Some("2027-01-01"), Some(-0.001)),
        ];

        let filtered = InstrumentFilter::default().filter(&data, "Testland", as_of);
        let ids: Vec<&str> = filtered.iter().map(|f| f.instrument.id.as_str()).collect();
        assert_eq!(ids, vec!["OK1", "CAP", "OK2"]);
        assert_eq!(filtered[0].year_fraction, 1826.0 / 365.0);
    }

    #[test]
    fn test_non_finite_yields_are_dropped() {
        let as_of = date("2025-01-01");
        let data = vec![
            bond("NEGINF", "Testland", Some("2030-01-01"), Some(f64::NEG_INFINITY)),
            bond("POSINF", "Testland", Some("2030-01-01"), Some(f64::INFINITY)),
            bond("NAN", "Testland", Some("2030-01-01"), Some(f64::NAN)),
            bond("OK", "Testland", Some("2030-01-01"), Some(0.03)),
        ];

        let filtered = InstrumentFilter::default().filter(&data, "Testland", as_of);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].instrument.id, "OK");
        assert!(filtered.iter().all(|f| f.yield_value.is_finite()));
    }

    #[test]
    fn test_year_fraction_boundary_is_exclusive() {
        let as_of = date("2025-01-01");
        // 91 days: 0.2493 years; 92 days: 0.2521 years
        let data = vec![
            bond("D91", "X", Some("2025-04-02"), Some(0.02)),
            bond("D92", "X", Some("2025-04-03"), Some(0.02)),
        ];
        let filtered = InstrumentFilter::default().filter(&data, "X", as_of);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].instrument.id, "D92");
    }

    #[test]
    fn test_unknown_country_is_empty() {
        let data = vec![bond("A", "Testland", Some("2030-01-01"), Some(0.03))];
        assert!(InstrumentFilter::default()
            .filter(&data, "Nowhere", date("2025-01-01"))
            .is_empty());
        assert!(InstrumentFilter::default()
            .filter(&[], "Testland", date("2025-01-01"))
            .is_empty());
    }

    #[test]
    fn test_custom_thresholds() {
        let config = FilterConfig {
            max_yield: 0.05,
            min_year_fraction: 2.0,
        };
        let data = vec![
            bond("A", "X", Some("2026-01-01"), Some(0.03)),
            bond("B", "X", Some("2030-01-01"), Some(0.06)),
            bond("C", "X", Some("2030-01-01"), Some(0.04)),
        ];
        let filtered = InstrumentFilter::new(config).filter(&data, "X", date("2025-01-01"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].instrument.id, "C");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: FilterConfig = serde_json::from_str(r#"{"max_yield": 0.5}"#).unwrap();
        assert_eq!(config.max_yield, 0.5);
        assert_eq!(config.min_year_fraction, 0.25);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn arb_instrument() -> impl Strategy<Value = Instrument> {
            (
                prop_oneof![Just("Testland"), Just("Otherland")],
                proptest::option::of(-400i64..12_000),
                proptest::option::of(prop_oneof![
                    8 => -0.05f64..2.0,
                    1 => Just(f64::NEG_INFINITY),
                    1 => Just(f64::NAN),
                ]),
            )
                .prop_map(|(country, days, y)| {
                    let maturity = days.map(|d| Date::from_ymd(2025, 1, 1).unwrap().add_days(d));
                    Instrument::new("ID", "Bond", country, maturity, y)
                })
        }

        proptest! {
            #[test]
            fn output_respects_thresholds(data in proptest::collection::vec(arb_instrument(), 0..40)) {
                let as_of = Date::from_ymd(2025, 1, 1).unwrap();
                let filter = InstrumentFilter::default();
                for f in filter.filter(&data, "Testland", as_of) {
                    prop_assert!(f.year_fraction > 0.25);
                    prop_assert!(f.yield_value <= 1.0);
                    prop_assert!(f.yield_value.is_finite());
                    prop_assert_eq!(f.instrument.country.as_str(), "Testland");
                }
            }

            #[test]
            fn filter_is_idempotent(data in proptest::collection::vec(arb_instrument(), 0..40)) {
                let as_of = Date::from_ymd(2025, 1, 1).unwrap();
                let filter = InstrumentFilter::default();
                prop_assert_eq!(
                    filter.filter(&data, "Testland", as_of),
                    filter.filter(&data, "Testland", as_of)
                );
            }
        }
    }
}
