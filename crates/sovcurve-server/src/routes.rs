//! Route definitions.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use sovcurve_engine::CurveService;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `service` - The curve service shared by every handler
pub fn create_router(service: CurveService) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Snapshot
        .route("/api/v1/countries", get(handlers::list_countries))
        // Curves
        .route("/api/v1/curve", get(handlers::get_curve))
        .route("/api/v1/reference", get(handlers::get_reference))
        .route("/api/v1/report", get(handlers::get_report))
        .with_state(state)
}
