//! Web Service for the MegaETH Bridge
//!
//! This service quotes Base → MegaETH transfers, records bridge requests
//! in SQLite and lets the operator close them out.

use anyhow::Result;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{
    config::Config,
    db::Database,
    web::{self, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ui=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MegaETH Bridge Web Service");

    // Load configuration
    let config = Config::load()?;
    tracing::info!("Configuration loaded:");
    tracing::info!("  Database: {}", config.db_path.display());
    tracing::info!("  Listen address: {}", config.listen_addr);

    // Initialize database
    let db = Database::new(&config.db_path)?;
    db.init()?;
    tracing::info!("Database initialized");

    // Start web server
    let state = AppState::new(db);
    let web_handle = tokio::spawn(async move {
        if let Err(e) = web::serve(config.listen_addr, state).await {
            tracing::error!("Web server error: {:?}", e);
        }
    });

    // Wait for shutdown signal
    match signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received shutdown signal, stopping...");
        }
        Err(err) => {
            tracing::error!("Failed to listen for shutdown signal: {:?}", err);
        }
    }

    web_handle.abort();
    tracing::info!("Shutdown complete");
    Ok(())
}
