//! Application builder and server runner.

use std::sync::Arc;

use axum::Router;
use tracing::{error, info};

use chedreg_core::config::AppConfig;
use chedreg_core::error::AppError;
use chedreg_core::result::AppResult;
use chedreg_database::DatabasePool;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application over a PostgreSQL pool.
pub fn build_app(config: AppConfig, db: &DatabasePool) -> AppResult<Router> {
    let state = AppState::new(
        config,
        Arc::new(db.audit_store()),
        Arc::new(db.principal_directory()),
    );
    build_router(state)
}

/// Runs the HTTP server until Ctrl+C.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> AppResult<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(config, &db)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "chedreg server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
