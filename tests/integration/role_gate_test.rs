//! Integration tests for per-route role gates.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;

use chedreg_api::{AppState, build_router_with};
use chedreg_core::error::ErrorKind;
use chedreg_database::MemoryAuditStore;
use chedreg_entity::audit::Outcome;

#[tokio::test]
async fn test_ched_staff_cannot_open_participant_routes() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app
        .create_principal("Ched Staff", "staff@ched.gov.ph", Some(("CHED", "ched")))
        .await;

    let response = app
        .request("GET", "/participant/dashboard", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let records = app.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].route_name.as_deref(), Some("participant.dashboard"));
    assert_eq!(records[0].status, Outcome::Failed);
}

#[tokio::test]
async fn test_participant_route_admits_institution_users() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app.participant("registrar@hei.edu.ph").await;

    let response = app
        .request("GET", "/participant/dashboard", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_principal_without_role_type_is_participant() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app
        .create_principal("Guest", "guest@example.com", None)
        .await;

    let response = app
        .request("GET", "/participant/dashboard", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/admin/audit-logs", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_ched_route_rejects_liaison() {
    let app = helpers::TestApp::new().await;
    let (_, liaison) = app.liaison().await;
    let (_, staff) = app
        .create_principal("Ched Staff", "staff@ched.gov.ph", Some(("CHED", "ched")))
        .await;

    let response = app.request("GET", "/ched/reports", Some(&liaison)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("GET", "/ched/reports", Some(&staff)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_audit_listing_requires_ched_admin() {
    let app = helpers::TestApp::new().await;
    let (_, participant) = app.participant("registrar@hei.edu.ph").await;
    let (_, staff) = app
        .create_principal("Ched Staff", "staff@ched.gov.ph", Some(("CHED", "ched")))
        .await;

    let response = app
        .request("GET", "/api/admin/audit-logs", Some(&participant))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");

    let response = app
        .request("GET", "/api/admin/audit-logs", Some(&staff))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_anonymous_request_is_unauthorized() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/admin/audit-logs", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/ched/reports", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    assert!(app.records().await.is_empty());
}

#[tokio::test]
async fn test_viewer_role_is_configurable() {
    let mut config = helpers::test_config();
    config.audit.viewer_role = "ched".to_string();
    let app = helpers::TestApp::with_config(config).await;
    let (_, liaison) = app.liaison().await;

    let response = app
        .request("GET", "/api/admin/audit-logs", Some(&liaison))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[test]
fn test_unknown_viewer_role_fails_router_build() {
    let mut config = helpers::test_config();
    config.audit.viewer_role = "superuser".to_string();
    let store = MemoryAuditStore::new();
    let state = AppState::new(config, Arc::new(store.clone()), Arc::new(store));

    let err = build_router_with(state, axum::Router::new()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}
