//! Curve service.
//!
//! Validates a request, filters the snapshot once, then runs benchmark
//! selection and the Svensson fit on the filtered set.

use std::sync::Arc;

use tracing::{debug, info, warn};

use sovcurve_core::traits::InstrumentSource;
use sovcurve_core::types::Date;
use sovcurve_curves::calibration::{FitResult, SvenssonFitter};
use sovcurve_curves::display::{to_percent, REFERENCE_YIELD_PERCENT_DP};
use sovcurve_curves::evaluation::{evaluate_grid, evaluate_one, parse_maturity, STANDARD_GRID};
use sovcurve_curves::filter::{FilteredInstrument, InstrumentFilter};
use sovcurve_curves::reference::closest_to_target;
use sovcurve_curves::CurveError;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult, ErrorPayload};
use crate::output::{
    CurveOutput, CurveReport, CurveRequest, FitDiagnostics, ReferencePointOutput,
    SpecificYield, SvenssonParameters,
};

/// Answers curve requests against a read-only instrument snapshot.
///
/// Cheap to clone and safe to share between request handlers.
#[derive(Clone)]
pub struct CurveService {
    source: Arc<dyn InstrumentSource>,
    config: EngineConfig,
    filter: InstrumentFilter,
    fitter: SvenssonFitter,
}

/// A validated request.
struct Resolved {
    country: String,
    date: Date,
    specific_maturity: Option<f64>,
    target_years: f64,
}

impl CurveService {
    /// Creates a service over `source`.
    pub fn new(source: Arc<dyn InstrumentSource>, config: EngineConfig) -> Self {
        Self {
            source,
            filter: InstrumentFilter::new(config.filter),
            fitter: SvenssonFitter::with_config(config.fitter),
            config,
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of records in the snapshot.
    pub fn instrument_count(&self) -> usize {
        self.source.len()
    }

    /// Distinct countries in the snapshot, sorted.
    pub fn countries(&self) -> Vec<String> {
        self.source.countries()
    }

    /// Selects the bond closest to the benchmark tenor.
    ///
    /// The date is required here.
    ///
    /// # Errors
    ///
    /// `MissingCountry`, `MissingDate`, `InvalidDate`, `InvalidMaturity` for
    /// a bad target, `NoDataForCountry` when nothing survives filtering.
    pub fn reference_point(&self, request: &CurveRequest) -> EngineResult<ReferencePointOutput> {
        if request.date.is_none() {
            return Err(EngineError::MissingDate);
        }
        let resolved = self.resolve(request)?;
        let filtered = self.filtered(&resolved)?;
        self.select_reference(&resolved, &filtered)
    }

    /// Fits the curve and evaluates it on the standard grid, plus the
    /// requested maturity if any.
    ///
    /// A missing date means today.
    ///
    /// # Errors
    ///
    /// `MissingCountry`, `InvalidDate`, `InvalidMaturity`,
    /// `NoDataForCountry`, `InsufficientData` or `FitError`.
    pub fn fit_curve(&self, request: &CurveRequest) -> EngineResult<CurveOutput> {
        let resolved = self.resolve(request)?;
        let filtered = self.filtered(&resolved)?;
        self.fit_filtered(&resolved, &filtered)
    }

    /// Runs benchmark selection and the fit independently and reports both.
    ///
    /// A missing date means today.
    ///
    /// # Errors
    ///
    /// Only request validation errors; selection and fit failures are
    /// reported inside the result.
    pub fn report(&self, request: &CurveRequest) -> EngineResult<CurveReport> {
        let resolved = self.resolve(request)?;

        let (reference, curve) = match self.filtered(&resolved) {
            Ok(filtered) => (
                self.select_reference(&resolved, &filtered),
                self.fit_filtered(&resolved, &filtered),
            ),
            Err(e) => (Err(e.clone()), Err(e)),
        };

        let (reference, reference_error) = split(reference);
        let (curve, curve_error) = split(curve);

        Ok(CurveReport {
            country: resolved.country,
            date: resolved.date,
            reference,
            reference_error,
            curve,
            curve_error,
        })
    }

    fn resolve(&self, request: &CurveRequest) -> EngineResult<Resolved> {
        let country = request
            .country
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or(EngineError::MissingCountry)?
            .to_string();

        let date = match request.date.as_deref() {
            Some(text) => Date::parse(text).map_err(|_| EngineError::invalid_date(text))?,
            None => Date::today(),
        };

        let specific_maturity = request
            .specific_maturity
            .as_deref()
            .map(parse_maturity)
            .transpose()?;

        let target_years = match request.target_years {
            Some(t) if !t.is_finite() || t <= 0.0 => {
                return Err(CurveError::invalid_maturity(t.to_string()).into())
            }
            Some(t) => t,
            None => self.config.reference_tenor_years,
        };

        Ok(Resolved {
            country,
            date,
            specific_maturity,
            target_years,
        })
    }

    fn filtered(&self, resolved: &Resolved) -> EngineResult<Vec<FilteredInstrument<'_>>> {
        let filtered = self
            .filter
            .filter(self.source.instruments(), &resolved.country, resolved.date);
        debug!(
            country = %resolved.country,
            date = %resolved.date,
            usable = filtered.len(),
            "filtered instruments"
        );

        if filtered.is_empty() {
            return Err(EngineError::NoDataForCountry {
                country: resolved.country.clone(),
                date: resolved.date,
            });
        }
        Ok(filtered)
    }

    fn select_reference(
        &self,
        resolved: &Resolved,
        filtered: &[FilteredInstrument<'_>],
    ) -> EngineResult<ReferencePointOutput> {
        let chosen = closest_to_target(filtered, resolved.target_years)?;
        debug!(
            country = %resolved.country,
            isin = %chosen.instrument.id,
            years = chosen.year_fraction,
            "reference point selected"
        );

        Ok(ReferencePointOutput {
            country: resolved.country.clone(),
            date: resolved.date,
            maturity: chosen.maturity,
            bond_name: chosen.instrument.name.clone(),
            yield_percent: to_percent(chosen.yield_value, REFERENCE_YIELD_PERCENT_DP),
            isin: chosen.instrument.id.clone(),
            year_fraction: chosen.year_fraction,
        })
    }

    fn fit_filtered(
        &self,
        resolved: &Resolved,
        filtered: &[FilteredInstrument<'_>],
    ) -> EngineResult<CurveOutput> {
        info!(
            country = %resolved.country,
            date = %resolved.date,
            instruments = filtered.len(),
            "fitting curve"
        );

        let fit = self.fitter.fit(filtered).map_err(|e| {
            warn!(country = %resolved.country, date = %resolved.date, error = %e, "curve fit failed");
            EngineError::from(e)
        })?;
        info!(country = %resolved.country, "{}", fit.summary());

        let grid = evaluate_grid(&fit.curve, &STANDARD_GRID)?;
        let specific_maturity = resolved
            .specific_maturity
            .map(|maturity| {
                evaluate_one(&fit.curve, maturity).map(|yield_percent| SpecificYield {
                    maturity,
                    yield_percent,
                })
            })
            .transpose()?;

        Ok(CurveOutput {
            country: resolved.country.clone(),
            date: resolved.date,
            parameters: parameters_of(&fit),
            grid,
            specific_maturity,
            diagnostics: FitDiagnostics {
                instruments: filtered.len(),
                iterations: fit.iterations,
                function_evaluations: fit.function_evaluations,
                rms_error_bps: fit.rms_error * 10_000.0,
                max_error_bps: fit.max_error() * 10_000.0,
            },
        })
    }
}

fn parameters_of(fit: &FitResult) -> SvenssonParameters {
    let (beta0, beta1, beta2, beta3, tau1, tau2) = fit.curve.parameters();
    SvenssonParameters {
        beta0,
        beta1,
        beta2,
        beta3,
        tau1,
        tau2,
    }
}

fn split<T>(outcome: EngineResult<T>) -> (Option<T>, Option<ErrorPayload>) {
    match outcome {
        Ok(value) => (Some(value), None),
        Err(e) => (None, Some(ErrorPayload::from(&e))),
    }
}
