//! Route definitions.
//!
//! Subsystem routes are mounted under `/api`; host application routes are
//! merged at the root. Every route passes through the activity recorder.
//! Routes that should be audited under a logical name are wrapped with
//! [`named`], and role-restricted routes with [`gated`].

use axum::extract::Request;
use axum::middleware::{self as axum_middleware, Next};
use axum::response::Response;
use axum::routing::{MethodRouter, get};
use axum::Router;
use tower_http::trace::TraceLayer;

use chedreg_auth::rbac::RequiredRole;
use chedreg_core::result::AppResult;

use crate::handlers;
use crate::middleware;
use crate::middleware::activity::RouteName;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Route name of the audit listing.
pub const AUDIT_LOGS_INDEX: &str = "audit-logs.index";
/// Route name of the audit export.
pub const AUDIT_LOGS_EXPORT: &str = "audit-logs.export";
/// Route name of the current-principal endpoint.
pub const ME_SHOW: &str = "me.show";

/// Attach a logical route name to every response of `route`.
pub fn named(name: &'static str, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.layer(axum_middleware::map_response(
        move |mut response: Response| async move {
            response.extensions_mut().insert(RouteName(name));
            response
        },
    ))
}

/// Restrict `route` to principals satisfying `required`.
pub fn gated(required: RequiredRole, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.layer(axum_middleware::from_fn(
        move |request: Request, next: Next| {
            middleware::rbac::enforce_role(required, request, next)
        },
    ))
}

/// Build the router with the subsystem's own routes only.
pub fn build_router(state: AppState) -> AppResult<Router> {
    build_router_with(state, Router::new())
}

/// Build the router, merging the host application's routes.
///
/// Fails when `audit.viewer_role` does not name a known role.
pub fn build_router_with(state: AppState, host_routes: Router<AppState>) -> AppResult<Router> {
    let viewer_role: RequiredRole = state.config.audit.viewer_role.parse()?;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(me_routes())
        .merge(audit_routes(viewer_role));

    Ok(Router::new()
        .nest("/api", api_routes)
        .merge(host_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::activity::track_activity,
        ))
        .layer(build_cors_layer(&state.config.server.cors))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state))
}

/// Unauthenticated liveness probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Current principal
fn me_routes() -> Router<AppState> {
    Router::new().route("/me", named(ME_SHOW, get(handlers::me::show)))
}

/// Audit trail listing and export
fn audit_routes(viewer_role: RequiredRole) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/audit-logs",
            named(
                AUDIT_LOGS_INDEX,
                gated(viewer_role, get(handlers::admin::audit::list_audit_logs)),
            ),
        )
        .route(
            "/admin/audit-logs/export",
            named(
                AUDIT_LOGS_EXPORT,
                gated(viewer_role, get(handlers::admin::audit::export_audit_logs)),
            ),
        )
}
