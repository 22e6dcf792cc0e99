//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chedreg_auth::jwt::JwtDecoder;
use chedreg_core::config::AppConfig;
use chedreg_database::store::{AuditStore, PrincipalDirectory};
use chedreg_service::audit::{AuditQueryService, AuditRecorder};

use crate::router::AUDIT_LOGS_INDEX;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Bearer token validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Principal lookup by user ID
    pub principals: Arc<dyn PrincipalDirectory>,
    /// Post-response audit recorder
    pub audit_recorder: Arc<AuditRecorder>,
    /// Audit trail search
    pub audit_query: Arc<AuditQueryService>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Wire the services over the given stores.
    pub fn new(
        config: AppConfig,
        audit_store: Arc<dyn AuditStore>,
        principals: Arc<dyn PrincipalDirectory>,
    ) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let audit_recorder = Arc::new(AuditRecorder::new(
            Arc::clone(&audit_store),
            AUDIT_LOGS_INDEX,
        ));
        let audit_query = Arc::new(AuditQueryService::new(
            audit_store,
            Duration::from_secs(config.audit.query_timeout_seconds),
        ));

        Self {
            config: Arc::new(config),
            jwt_decoder,
            principals,
            audit_recorder,
            audit_query,
            started_at: Instant::now(),
        }
    }
}
