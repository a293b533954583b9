//! Request handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use sovcurve_curves::display::PARAMETER_API_DP;
use sovcurve_curves::evaluation::parse_maturity;
use sovcurve_engine::{
    CurveOutput, CurveRequest, CurveService, EngineError, EngineResult, ErrorPayload,
};

/// Application state.
pub struct AppState {
    /// The curve service
    pub service: CurveService,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
    instruments: usize,
}

/// Health check handler.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        instruments: state.service.instrument_count(),
    })
}

/// Countries response.
#[derive(Serialize)]
pub struct CountriesResponse {
    countries: Vec<String>,
    total: usize,
}

/// List the countries present in the snapshot.
pub async fn list_countries(State(state): State<Arc<AppState>>) -> Json<CountriesResponse> {
    let countries = state.service.countries();
    let total = countries.len();
    Json(CountriesResponse { countries, total })
}

/// Query parameters for curve and report requests.
#[derive(Debug, Default, Deserialize)]
pub struct CurveQuery {
    /// Country key.
    pub country: Option<String>,
    /// As-of date (YYYY-MM-DD). Defaults to today.
    pub date: Option<String>,
    /// Extra maturity in years to evaluate.
    pub specific_maturity: Option<String>,
}

impl From<CurveQuery> for CurveRequest {
    fn from(query: CurveQuery) -> Self {
        Self {
            country: query.country,
            date: query.date,
            specific_maturity: query.specific_maturity,
            target_years: None,
        }
    }
}

/// Query parameters for reference-point requests.
#[derive(Debug, Default, Deserialize)]
pub struct ReferenceQuery {
    /// Country key.
    pub country: Option<String>,
    /// As-of date (YYYY-MM-DD). Required.
    pub date: Option<String>,
    /// Benchmark tenor in years. Defaults to the configured tenor.
    pub target: Option<String>,
}

impl TryFrom<ReferenceQuery> for CurveRequest {
    type Error = EngineError;

    fn try_from(query: ReferenceQuery) -> Result<Self, Self::Error> {
        let target_years = query.target.as_deref().map(parse_maturity).transpose()?;
        Ok(Self {
            country: query.country,
            date: query.date,
            specific_maturity: None,
            target_years,
        })
    }
}

/// Fit the Svensson curve for a country and date.
pub async fn get_curve(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CurveQuery>,
) -> Response {
    let request = CurveRequest::from(query);
    let service = state.service.clone();

    match run_blocking(move || service.fit_curve(&request)).await {
        Ok(output) => Json(for_api(output)).into_response(),
        Err(response) => response,
    }
}

/// Select the benchmark bond nearest the target tenor.
pub async fn get_reference(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReferenceQuery>,
) -> Response {
    let request = match CurveRequest::try_from(query) {
        Ok(request) => request,
        Err(e) => return error_response(&e),
    };

    match state.service.reference_point(&request) {
        Ok(output) => Json(output).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Reference point and curve side by side.
///
/// Invalid requests are errors. Selection and fit outcomes, including no
/// data for the country, are reported inside the body.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CurveQuery>,
) -> Response {
    let request = CurveRequest::from(query);
    let service = state.service.clone();

    match run_blocking(move || service.report(&request)).await {
        Ok(mut report) => {
            report.curve = report.curve.map(for_api);
            Json(report).into_response()
        }
        Err(response) => response,
    }
}

/// Runs a fitting task on the blocking pool.
async fn run_blocking<T, F>(task: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce() -> EngineResult<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(error_response(&e)),
        Err(e) => {
            error!("Fit task failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "internal error",
                    "kind": "internal"
                })),
            )
                .into_response())
        }
    }
}

/// Parameters go out at API precision.
fn for_api(mut output: CurveOutput) -> CurveOutput {
    output.parameters = output.parameters.rounded(PARAMETER_API_DP);
    output
}

fn error_response(err: &EngineError) -> Response {
    let status = StatusCode::from_u16(err.kind().status_class())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorPayload::from(err))).into_response()
}
