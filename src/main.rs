use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cdi_core::config::{
    probe_latency_from_env_value, recent_messages_from_env_value, DEFAULT_REST_ADDR,
};
use cdi_core::{CoreConfig, SimulatedProbe};
use cdi_data::DashboardStore;

mod server;

/// Main entry point for the CDI dashboard server.
///
/// Loads the embedded sample collections, then serves the dashboard REST
/// API with Swagger UI at `/swagger-ui`.
///
/// # Environment Variables
/// - `CDI_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CDI_PROBE_LATENCY_MS`: simulated connection-test round-trip (default: 1200)
/// - `CDI_RECENT_MESSAGES`: messages shown on the overview page (default: 8)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, data load, or startup fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("cdi=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CoreConfig::new(
        std::env::var("CDI_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into()),
        probe_latency_from_env_value(std::env::var("CDI_PROBE_LATENCY_MS").ok())?,
        recent_messages_from_env_value(std::env::var("CDI_RECENT_MESSAGES").ok())?,
    )?;

    let store = Arc::new(DashboardStore::load()?);
    tracing::info!(
        "++ Loaded sample data: {} feeds, {} messages, {} mappings, {} audits, {} patients",
        store.feeds.len(),
        store.messages.len(),
        store.mappings.len(),
        store.audits.len(),
        store.patients.len()
    );
    tracing::info!("++ Starting CDI REST on {}", config.rest_addr());

    let probe = Arc::new(SimulatedProbe::new(config.probe_latency()));
    let app = server::router(server::AppState::new(
        store,
        probe,
        config.recent_messages(),
    ));

    let listener = tokio::net::TcpListener::bind(config.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
