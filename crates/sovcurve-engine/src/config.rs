//! Engine configuration.

use serde::{Deserialize, Serialize};
use sovcurve_curves::calibration::FitterConfig;
use sovcurve_curves::filter::FilterConfig;
use sovcurve_curves::reference::DEFAULT_TARGET_YEARS;

/// Settings for curve requests. Every field has a default, so partial
/// configuration files are fine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Benchmark tenor for reference-point selection, in years.
    pub reference_tenor_years: f64,
    /// Instrument filter thresholds.
    pub filter: FilterConfig,
    /// Svensson fitter settings.
    pub fitter: FitterConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_tenor_years: DEFAULT_TARGET_YEARS,
            filter: FilterConfig::default(),
            fitter: FitterConfig::default(),
        }
    }
}
