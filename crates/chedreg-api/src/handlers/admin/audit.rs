//! Audit log handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_DISPOSITION;
use axum::response::IntoResponse;
use chrono::Utc;
use tracing::info;

use chedreg_service::audit::AuditListing;

use crate::dto::request::AuditLogQuery;
use crate::dto::response::{ApiResponse, AuditExportResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/audit-logs
pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(params): Query<AuditLogQuery>,
) -> ApiResult<Json<ApiResponse<AuditListing>>> {
    let listing = state.audit_query.list(&params.into_query()).await?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// GET /api/admin/audit-logs/export
pub async fn export_audit_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<AuditLogQuery>,
) -> ApiResult<impl IntoResponse> {
    let query = params.into_query();
    let max_rows = state.config.audit.export_max_rows;
    let logs = state.audit_query.export(&query, max_rows).await?;

    info!(
        user_id = %auth.user_id(),
        rows = logs.len(),
        "Audit log exported"
    );

    let now = Utc::now();
    let disposition = format!(
        "attachment; filename=\"audit-logs-{}.json\"",
        now.format("%Y%m%d%H%M%S")
    );

    Ok((
        [(CONTENT_DISPOSITION, disposition)],
        Json(AuditExportResponse {
            exported_at: now.to_rfc3339(),
            filters: query.applied(),
            total: logs.len(),
            logs,
        }),
    ))
}
