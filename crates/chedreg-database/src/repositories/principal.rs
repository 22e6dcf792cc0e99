//! Principal lookup against the `users` and `role_types` tables.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use chedreg_core::error::{AppError, ErrorKind};
use chedreg_core::result::AppResult;
use chedreg_entity::principal::{Principal, PrincipalRow};

use crate::store::PrincipalDirectory;

/// Read-only repository for principals.
#[derive(Debug, Clone)]
pub struct PrincipalRepository {
    pool: PgPool,
}

impl PrincipalRepository {
    /// Create a new principal repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrincipalDirectory for PrincipalRepository {
    async fn find_principal(&self, id: Uuid) -> AppResult<Option<Principal>> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            "SELECT u.id, u.name, u.email, \
                    r.id AS role_type_id, r.name AS role_type_name, r.slug AS role_type_slug \
             FROM users u LEFT JOIN role_types r ON r.id = u.role_type_id \
             WHERE u.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load principal", e))?;

        Ok(row.map(Principal::from))
    }
}
