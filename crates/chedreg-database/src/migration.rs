//! Schema migrations for principals and the audit trail.

use sqlx::PgPool;
use tracing::info;

use chedreg_core::error::{AppError, ErrorKind};
use chedreg_core::result::AppResult;

/// Apply all pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Applying audit schema migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Audit schema is up to date");
    Ok(())
}
