//! # Sovcurve Server
//!
//! JSON API for the sovereign curve service.
//!
//! ## Features
//!
//! - Svensson curve fits with standard-grid yields
//! - Benchmark bond selection near a target tenor
//! - Health endpoint reporting the loaded snapshot size
//! - Configuration via TOML file
//!
//! ## Usage
//!
//! ```ignore
//! use sovcurve_server::Server;
//!
//! let server = Server::new(config, service);
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use sovcurve_engine::CurveService;

pub use config::ServerConfig;

/// The Sovcurve server.
pub struct Server {
    config: ServerConfig,
    service: CurveService,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig, service: CurveService) -> Self {
        Self { config, service }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.service.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = SocketAddr::new(
            self.config.host.parse().unwrap_or([0, 0, 0, 0].into()),
            self.config.port,
        );

        info!("Starting Sovcurve server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}
