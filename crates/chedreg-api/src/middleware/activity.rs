//! Request activity recording.
//!
//! Resolves the principal once per request, hands it to inner layers and
//! handlers through [`CurrentPrincipal`], and appends one audit record after
//! the response is produced and before it is returned.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use chedreg_entity::audit::HttpMethod;
use chedreg_service::audit::CompletedRequest;

use crate::extractors::auth::{CurrentPrincipal, authenticate};
use crate::extractors::client::{client_ip, user_agent};
use crate::state::AppState;

/// Logical route name, attached to responses by [`crate::router::named`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteName(pub &'static str);

/// Audits every request made by an authenticated principal.
pub async fn track_activity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let principal = match authenticate(&state, request.headers()).await {
        Ok(principal) => principal,
        Err(e) => {
            debug!(error = %e, "Request treated as anonymous");
            None
        }
    };

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let ip_address = client_ip(request.headers());
    let agent = user_agent(request.headers());

    request
        .extensions_mut()
        .insert(CurrentPrincipal(principal.clone()));

    let response = next.run(request).await;

    let Some(principal) = principal else {
        return response;
    };

    let method = match method.as_str().parse::<HttpMethod>() {
        Ok(method) => method,
        Err(_) => {
            warn!(method = %method, path = %path, "Skipping audit of unsupported method");
            return response;
        }
    };

    let completed = CompletedRequest {
        route_name: response
            .extensions()
            .get::<RouteName>()
            .map(|name| name.0.to_string()),
        path,
        method,
        status_code: response.status().as_u16(),
        ip_address,
        user_agent: agent,
    };

    state
        .audit_recorder
        .record_activity(Some(&principal), &completed)
        .await;

    response
}
