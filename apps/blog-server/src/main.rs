//! # Blog Server
//!
//! The main entry point for the Actix-web HTTP server.

use anyhow::Context;

use blog_server::config::AppConfig;
use blog_server::lifecycle::ServerController;
use blog_server::telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Blog API Server on {}:{}",
        config.server.host,
        config.server.port
    );

    let mut controller = ServerController::new(config.server.clone());

    // Startup failures are fatal
    controller
        .run_server(&config.database_url)
        .await
        .context("server failed to start")?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    tracing::info!("Shutdown signal received");
    controller.close_server().await;

    Ok(())
}
