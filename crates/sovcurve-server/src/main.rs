//! Sovcurve server entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sovcurve_engine::CurveService;
use sovcurve_ext_file::CsvInstrumentSource;
use sovcurve_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,sovcurve=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Sovcurve Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/sovcurve.toml".to_string());

    let server_config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    // Load the bond snapshot once; it is read-only from here on
    let source = CsvInstrumentSource::from_path(&server_config.data_file)?;
    let service = CurveService::new(Arc::new(source), server_config.engine);
    info!(
        "Loaded {} instruments from {}",
        service.instrument_count(),
        server_config.data_file
    );

    // Start server
    let server = Server::new(server_config, service);
    server.start().await?;

    Ok(())
}
