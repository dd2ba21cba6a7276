//! Airtable records proxy.
//!
//! Forwards CRUD requests from a browser frontend to the Airtable REST
//! API, injecting the server-side bearer token so it never reaches the
//! client. The frontend (e.g. GitHub Pages) calls this server; this
//! server calls Airtable.
//!
//! Required env: `AIRTABLE_TOKEN`, `AIRTABLE_BASE_ID`,
//! `AIRTABLE_TABLE_NAME`. Optional: `PORT` (default 3000),
//! `AIRTABLE_API_URL`, `METRICS_ADDRESS`.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use airtable_proxy::config;
use airtable_proxy::http::HttpServer;
use airtable_proxy::observability::metrics;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airtable_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("airtable-proxy v0.1.0 starting");

    // Load configuration from the environment; fatal before we bind.
    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration error");
            if matches!(e, config::ConfigError::MissingVar(_)) {
                eprintln!("Missing env: AIRTABLE_TOKEN, AIRTABLE_BASE_ID, AIRTABLE_TABLE_NAME");
            } else {
                eprintln!("Configuration error: {e}");
            }
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        table = %config.table_name,
        upstream = %config.upstream_base,
        "Configuration loaded"
    );

    // Optional Prometheus exporter
    if let Some(raw) = config.metrics_address.as_deref() {
        match raw.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(metrics_address = %raw, "Failed to parse metrics address");
            }
        }
    }

    // Bind TCP listener
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
