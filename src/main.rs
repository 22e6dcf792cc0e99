//! chedreg server: request activity auditing for the CHED registration
//! system.
//!
//! Loads configuration, applies migrations, and serves the HTTP API.

use tracing_subscriber::{EnvFilter, fmt};

use chedreg_core::config::AppConfig;
use chedreg_core::error::AppError;
use chedreg_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("CHEDREG_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connect, migrate, serve.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting chedreg v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    chedreg_database::migration::run_migrations(db.pool()).await?;

    chedreg_api::run_server(config, db).await
}
