//! # Book Catalog API Server
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppConfig::load()   defaults → catalog.toml → CATALOG_* env          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  tracing subscriber  RUST_LOG, else [logging].level                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Database::new()     pool + WAL + migrations                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  axum::serve()       until Ctrl+C / SIGTERM                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use catalog_api::{build_router, AppConfig, AppState};
use catalog_db::Database;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        bind = %config.server.bind_address(),
        database = %config.database.path.display(),
        transactional_sync = config.catalog.transactional_sync,
        "Starting book catalog API"
    );
    if config.catalog.transactional_sync && config.database.max_connections == 1 {
        warn!("transactional_sync with a single connection serializes all requests");
    }

    let db = Database::new(config.database.to_db_config())
        .await
        .context("Failed to open database")?;
    info!("Database ready");

    let app = build_router(AppState::new(db.clone(), config.catalog.transactional_sync));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
