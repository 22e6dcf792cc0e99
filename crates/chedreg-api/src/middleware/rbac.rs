//! Per-route role gate.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use chedreg_auth::rbac::{RequiredRole, RoleGate};

use crate::error::ApiError;
use crate::extractors::auth::CurrentPrincipal;

/// Rejects the request unless the current principal satisfies `required`.
///
/// Relies on [`CurrentPrincipal`] set by the activity middleware; a missing
/// extension is treated as an anonymous request.
pub async fn enforce_role(required: RequiredRole, request: Request, next: Next) -> Response {
    let decision = {
        let principal = request
            .extensions()
            .get::<CurrentPrincipal>()
            .and_then(|current| current.0.as_ref());
        RoleGate::authorize(principal, required)
    };

    match decision {
        Ok(()) => next.run(request).await,
        Err(e) => ApiError(e).into_response(),
    }
}
