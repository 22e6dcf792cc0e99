//! Audit log repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use chedreg_core::error::{AppError, ErrorKind};
use chedreg_core::result::AppResult;
use chedreg_core::types::pagination::{PageRequest, PageResponse};
use chedreg_entity::audit::{AuditEntry, AuditRecord, CreateAuditRecord};

use crate::store::{AuditSearch, AuditStore, like_pattern};

/// Audit rows joined with the acting user and their role type.
const FROM_CLAUSE: &str = "FROM audit_logs a \
     LEFT JOIN users u ON u.id = a.user_id \
     LEFT JOIN role_types r ON r.id = u.role_type_id";

/// Plain page views are never listed.
const BASE_CONDITION: &str = "a.activity <> 'view'";

/// Repository for audit log records.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for AuditLogRepository {
    async fn append(&self, data: &CreateAuditRecord) -> AppResult<AuditRecord> {
        sqlx::query_as::<_, AuditRecord>(
            "INSERT INTO audit_logs \
             (user_id, route_name, path, method, activity, description, status, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.route_name)
        .bind(&data.path)
        .bind(data.method)
        .bind(data.activity)
        .bind(&data.description)
        .bind(data.status)
        .bind(&data.ip_address)
        .bind(&data.user_agent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append audit record", e))
    }

    async fn search(
        &self,
        filter: &AuditSearch,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditEntry>> {
        let mut conditions = vec![BASE_CONDITION.to_string()];
        let mut param_idx = 1u32;

        if filter.status.is_some() {
            conditions.push(format!("a.status = ${param_idx}"));
            param_idx += 1;
        }
        let pattern = filter.search.as_deref().map(like_pattern);
        if pattern.is_some() {
            let p = param_idx;
            conditions.push(format!(
                "(a.route_name ILIKE ${p} OR a.path ILIKE ${p} \
                 OR a.activity::text ILIKE ${p} OR a.status::text ILIKE ${p} \
                 OR a.description ILIKE ${p} OR a.ip_address ILIKE ${p} \
                 OR a.user_agent ILIKE ${p} OR u.name ILIKE ${p} OR u.email ILIKE ${p} \
                 OR r.name ILIKE ${p} OR r.slug ILIKE ${p})"
            ));
            param_idx += 1;
        }
        let lower = filter.lower_bound();
        if lower.is_some() {
            conditions.push(format!("a.created_at >= ${param_idx}"));
            param_idx += 1;
        }
        let upper = filter.upper_bound();
        if upper.is_some() {
            conditions.push(format!("a.created_at < ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = format!("WHERE {}", conditions.join(" AND "));

        let count_sql = format!("SELECT COUNT(*) {FROM_CLAUSE} {where_clause}");
        let select_sql = format!(
            "SELECT a.*, u.name AS actor_name, u.email AS actor_email, r.name AS actor_role \
             {FROM_CLAUSE} {where_clause} \
             ORDER BY a.created_at DESC, a.id DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, AuditEntry>(&select_sql);

        if let Some(status) = filter.status {
            count_query = count_query.bind(status);
            select_query = select_query.bind(status);
        }
        if let Some(p) = &pattern {
            count_query = count_query.bind(p.clone());
            select_query = select_query.bind(p.clone());
        }
        if let Some(lo) = lower {
            count_query = count_query.bind(lo);
            select_query = select_query.bind(lo);
        }
        if let Some(hi) = upper {
            count_query = count_query.bind(hi);
            select_query = select_query.bind(hi);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count audit records", e)
        })?;

        let entries = select_query
            .bind(sql_bound(page.limit()))
            .bind(sql_bound(page.offset()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search audit log", e)
            })?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total.max(0) as u64,
        ))
    }
}

/// `LIMIT`/`OFFSET` values are `BIGINT`; anything larger saturates.
fn sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
