//! Current principal handler.

use axum::Json;

use crate::dto::response::{ApiResponse, PrincipalResponse};
use crate::extractors::AuthUser;

/// GET /api/me
pub async fn show(auth: AuthUser) -> Json<ApiResponse<PrincipalResponse>> {
    Json(ApiResponse::ok(PrincipalResponse::from(&auth.context().principal)))
}
