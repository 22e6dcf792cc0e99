//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use chedreg_api::{AppState, build_router_with, gated, named};
use chedreg_auth::jwt::JwtEncoder;
use chedreg_auth::rbac::RequiredRole;
use chedreg_core::config::AppConfig;
use chedreg_database::MemoryAuditStore;
use chedreg_entity::audit::AuditRecord;
use chedreg_entity::principal::{Principal, RoleType};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for direct inspection
    pub store: MemoryAuditStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application with a custom configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let store = MemoryAuditStore::new();
        let state = AppState::new(
            config.clone(),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        );
        let router =
            build_router_with(state, host_routes()).expect("Failed to build router");

        Self {
            router,
            store,
            config,
        }
    }

    /// Register a principal and return it with a valid access token
    pub async fn create_principal(
        &self,
        name: &str,
        email: &str,
        role: Option<(&str, &str)>,
    ) -> (Principal, String) {
        let role_type = role.map(|(role_name, slug)| RoleType {
            id: 1,
            name: role_name.to_string(),
            slug: slug.to_string(),
        });
        let principal = Principal::new(Uuid::new_v4(), name, email, role_type);
        self.store.insert_principal(principal.clone()).await;

        let (token, _) = JwtEncoder::new(&self.config.auth)
            .issue_access_token(principal.id)
            .expect("Failed to issue token");

        (principal, token)
    }

    /// A CHED liaison officer (`CHED LO` / `ched-lo`)
    pub async fn liaison(&self) -> (Principal, String) {
        self.create_principal("Liaison Officer", "lo@ched.gov.ph", Some(("CHED LO", "ched-lo")))
            .await
    }

    /// A higher-education institution user
    pub async fn participant(&self, email: &str) -> (Principal, String) {
        self.create_principal("HEI Registrar", email, Some(("HEI", "hei")))
            .await
    }

    /// Every stored record, including plain views
    pub async fn records(&self) -> Vec<AuditRecord> {
        self.store.records().await
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, token: Option<&str>) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("user-agent", "integration-test")
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// IDs of the listing page returned for `query`
    pub async fn listing_ids(&self, token: &str, query: &str) -> Vec<i64> {
        let response = self
            .request("GET", &format!("/api/admin/audit-logs{query}"), Some(token))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["data"]["logs"]["items"]
            .as_array()
            .expect("items array")
            .iter()
            .map(|item| item["id"].as_i64().expect("id"))
            .collect()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: axum::http::HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

/// Configuration used by integration tests
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::with_database_url("postgres://unused");
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config
}

/// Host application routes exercised through the audit middleware
fn host_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/programmes/{id}/approve",
            named("programmes.approve", post(|| async { StatusCode::OK })),
        )
        .route(
            "/login",
            named(
                "login.store",
                post(|| async { StatusCode::UNPROCESSABLE_ENTITY }),
            ),
        )
        .route(
            "/events",
            named("events.store", post(|| async { StatusCode::CREATED }))
                .merge(named("events.index", get(|| async { StatusCode::OK }))),
        )
        .route(
            "/participant/dashboard",
            named(
                "participant.dashboard",
                gated(RequiredRole::Participant, get(|| async { StatusCode::OK })),
            ),
        )
        .route(
            "/ched/reports",
            named(
                "reports.index",
                gated(RequiredRole::Ched, get(|| async { StatusCode::OK })),
            ),
        )
}
