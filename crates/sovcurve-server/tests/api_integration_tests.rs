//! Integration tests for the Sovcurve Server API endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use sovcurve_core::{Date, Instrument};
use sovcurve_engine::{CurveService, EngineConfig};
use sovcurve_ext_file::{CsvInstrumentSource, InMemoryInstrumentSource};
use sovcurve_server::routes::create_router;
use sovcurve_server::{Server, ServerConfig};

fn bond(id: &str, country: &str, maturity: &str, y: f64) -> Instrument {
    Instrument::new(
        id,
        format!("{country} {maturity}"),
        country,
        Date::parse(maturity).ok(),
        Some(y),
    )
}

/// Five Testland bonds spanning 1 to 20 years, two Smalland bonds and one
/// matured Pastland bond.
fn create_test_service(config: EngineConfig) -> CurveService {
    let source: InMemoryInstrumentSource = vec![
        bond("TL01", "Testland", "2026-01-01", 0.015),
        bond("TL03", "Testland", "2028-01-01", 0.022),
        bond("TL05", "Testland", "2030-01-01", 0.028),
        bond("TL10", "Testland", "2035-01-01", 0.035),
        bond("TL20", "Testland", "2045-01-01", 0.042),
        bond("SL02", "Smalland", "2027-01-01", 0.02),
        bond("SL09", "Smalland", "2034-01-01", 0.03),
        bond("OLD", "Pastland", "2020-01-01", 0.03),
    ]
    .into();
    CurveService::new(Arc::new(source), config)
}

fn create_test_app() -> axum::Router {
    create_router(create_test_service(EngineConfig::default()))
}

/// Helper to make a GET request and get JSON response.
async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));

    (status, json)
}

// =============================================================================
// HEALTH CHECK TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (status, json) = get_json(create_test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["instruments"], 8);
}

#[tokio::test]
async fn test_api_v1_health_endpoint() {
    let (status, json) = get_json(create_test_app(), "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_countries_endpoint() {
    let (status, json) = get_json(create_test_app(), "/api/v1/countries").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["countries"], json!(["Pastland", "Smalland", "Testland"]));
    assert_eq!(json["total"], 3);
}

// =============================================================================
// CURVE TESTS
// =============================================================================

#[tokio::test]
async fn test_curve_endpoint() {
    let (status, json) = get_json(
        create_test_app(),
        "/api/v1/curve?country=Testland&date=2025-01-01&specific_maturity=7",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["country"], "Testland");
    assert_eq!(json["date"], "2025-01-01");

    let grid = json["grid"].as_array().unwrap();
    assert_eq!(grid.len(), 15);
    assert_eq!(grid[0]["tenor"], "1M");
    assert_eq!(grid[14]["tenor"], "20Y");

    let specific = &json["specific_maturity"];
    assert_eq!(specific["maturity"], 7.0);
    let y = specific["yield"].as_f64().unwrap();
    assert!(y > 2.8 && y < 3.5, "7y yield {y}");

    assert_eq!(json["diagnostics"]["instruments"], 5);
}

#[tokio::test]
async fn test_curve_parameters_rounded_for_api() {
    let (status, json) =
        get_json(create_test_app(), "/api/v1/curve?country=Testland&date=2025-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.get("specific_maturity").is_none());

    let params = json["parameters"].as_object().unwrap();
    assert_eq!(params.len(), 6);
    for name in ["beta0", "beta1", "beta2", "beta3", "tau1", "tau2"] {
        let value = params[name].as_f64().unwrap();
        let scaled = value * 1e6;
        assert!((scaled - scaled.round()).abs() < 1e-6, "{name} = {value}");
    }
    assert!(params["tau1"].as_f64().unwrap() > 0.0);
    assert!(params["tau2"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_curve_missing_country() {
    let (status, json) = get_json(create_test_app(), "/api/v1/curve?date=2025-01-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "missing_country");
    assert_eq!(json["error"], "country is required");
}

#[tokio::test]
async fn test_curve_invalid_date() {
    let (status, json) =
        get_json(create_test_app(), "/api/v1/curve?country=Testland&date=01/02/2025").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "invalid_date");
}

#[tokio::test]
async fn test_curve_invalid_maturity() {
    let (status, json) = get_json(
        create_test_app(),
        "/api/v1/curve?country=Testland&date=2025-01-01&specific_maturity=abc",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "invalid_maturity");
}

#[tokio::test]
async fn test_curve_no_data() {
    let (status, json) =
        get_json(create_test_app(), "/api/v1/curve?country=Atlantis&date=2025-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["kind"], "no_data_for_country");

    // Every Pastland bond has matured
    let (status, json) =
        get_json(create_test_app(), "/api/v1/curve?country=Pastland&date=2025-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["kind"], "no_data_for_country");
}

#[tokio::test]
async fn test_curve_insufficient_data() {
    let (status, json) =
        get_json(create_test_app(), "/api/v1/curve?country=Smalland&date=2025-01-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "insufficient_data");
}

#[tokio::test]
async fn test_curve_fit_failure() {
    let mut config = EngineConfig::default();
    config.fitter.max_function_evaluations = 8;
    let app = create_router(create_test_service(config));

    let (status, json) = get_json(app, "/api/v1/curve?country=Testland&date=2025-01-01").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["kind"], "fit_error");
}

// =============================================================================
// REFERENCE POINT TESTS
// =============================================================================

#[tokio::test]
async fn test_reference_endpoint() {
    let (status, json) =
        get_json(create_test_app(), "/api/v1/reference?country=Testland&date=2025-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["isin"], "TL10");
    assert_eq!(json["maturity"], "2035-01-01");
    assert_eq!(json["bond_name"], "Testland 2035-01-01");
    assert_eq!(json["yield"], 3.5);
}

#[tokio::test]
async fn test_reference_target_override() {
    let (status, json) = get_json(
        create_test_app(),
        "/api/v1/reference?country=Testland&date=2025-01-01&target=1.5",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["isin"], "TL01");
    assert_eq!(json["yield"], 1.5);
}

#[tokio::test]
async fn test_reference_errors() {
    let (status, json) =
        get_json(create_test_app(), "/api/v1/reference?country=Testland").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "invalid_date");
    assert_eq!(json["error"], "date is required");

    let (status, json) = get_json(
        create_test_app(),
        "/api/v1/reference?country=Testland&date=2025-01-01&target=ten",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "invalid_maturity");

    // Two bonds are enough to pick a benchmark
    let (status, json) =
        get_json(create_test_app(), "/api/v1/reference?country=Smalland&date=2025-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["isin"], "SL09");
}

// =============================================================================
// REPORT TESTS
// =============================================================================

#[tokio::test]
async fn test_report_endpoint() {
    let (status, json) =
        get_json(create_test_app(), "/api/v1/report?country=Testland&date=2025-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reference"]["isin"], "TL10");
    assert_eq!(json["curve"]["grid"].as_array().unwrap().len(), 15);
    assert!(json.get("reference_error").is_none());
    assert!(json.get("curve_error").is_none());
}

#[tokio::test]
async fn test_report_partial_outcome() {
    let (status, json) =
        get_json(create_test_app(), "/api/v1/report?country=Smalland&date=2025-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reference"]["isin"], "SL09");
    assert!(json.get("curve").is_none());
    assert_eq!(json["curve_error"]["kind"], "insufficient_data");
}

#[tokio::test]
async fn test_report_no_data() {
    let (status, json) =
        get_json(create_test_app(), "/api/v1/report?country=Atlantis&date=2025-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reference_error"]["kind"], "no_data_for_country");
    assert_eq!(json["curve_error"]["kind"], "no_data_for_country");
}

#[tokio::test]
async fn test_report_invalid_request() {
    let (status, json) = get_json(create_test_app(), "/api/v1/report?date=2025-01-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "missing_country");
}

// =============================================================================
// SERVER TESTS
// =============================================================================

#[tokio::test]
async fn test_server_router_from_csv_snapshot() {
    let csv = "\
Country_Name,Maturity,Issue,ISIN,\"Indicative yield, %\"
Testland,2026-01-01,TL 2026,TL01,0.015
Testland,2028/01/01,TL 2028,TL03,0.022
Testland,01/01/2030,TL 2030,TL05,0.028
Testland,2035-01-01 00:00:00,TL 2035,TL10,0.035
Testland,2045-01-01,TL 2045,TL20,0.042
Testland,,TL undated,TLXX,0.05
";
    let source = CsvInstrumentSource::from_reader(csv.as_bytes()).unwrap();
    let service = CurveService::new(Arc::new(source), EngineConfig::default());
    let server = Server::new(ServerConfig::default(), service);

    let (status, json) = get_json(server.router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["instruments"], 6);

    let (status, json) = get_json(
        server.router(),
        "/api/v1/curve?country=Testland&date=2025-01-01",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["diagnostics"]["instruments"], 5);
}
