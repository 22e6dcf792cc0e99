//! Records one audit entry per completed, authenticated request.

use std::sync::Arc;

use tracing::{debug, error};

use chedreg_core::result::AppResult;
use chedreg_database::store::AuditStore;
use chedreg_entity::audit::{ActivityKind, AuditRecord, CreateAuditRecord, HttpMethod};
use chedreg_entity::principal::Principal;

use super::{classifier, describe, status};

/// What the recorder needs to know about a request once its response
/// status is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRequest {
    /// Logical route name, when the route has one.
    pub route_name: Option<String>,
    /// Request path as received.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Final response status code.
    pub status_code: u16,
    /// Client IP.
    pub ip_address: Option<String>,
    /// Client User-Agent.
    pub user_agent: Option<String>,
}

/// Post-response audit recorder.
#[derive(Debug, Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditStore>,
    listing_route: String,
}

impl AuditRecorder {
    /// Creates a recorder writing to `store`. Plain views of
    /// `listing_route` are never recorded.
    pub fn new(store: Arc<dyn AuditStore>, listing_route: impl Into<String>) -> Self {
        Self {
            store,
            listing_route: listing_route.into(),
        }
    }

    /// Build the record for a request without persisting it.
    ///
    /// Returns `None` when there is no principal, or when the request is a
    /// plain view of the audit listing itself.
    pub fn build_entry(
        &self,
        principal: Option<&Principal>,
        request: &CompletedRequest,
    ) -> Option<CreateAuditRecord> {
        let principal = principal?;
        let route_name = request.route_name.as_deref().filter(|n| !n.is_empty());
        let activity = classifier::classify(route_name, request.method);

        if activity == ActivityKind::View && route_name == Some(self.listing_route.as_str()) {
            return None;
        }

        let page = describe::humanize_page(route_name, &request.path);
        Some(CreateAuditRecord {
            user_id: principal.id,
            route_name: route_name.map(String::from),
            path: normalize_path(&request.path),
            method: request.method,
            activity,
            description: describe::describe(activity, &page),
            status: status::resolve(request.status_code, activity),
            ip_address: request.ip_address.clone(),
            user_agent: request.user_agent.clone(),
        })
    }

    /// Build and append the record, surfacing store errors.
    pub async fn try_record(
        &self,
        principal: Option<&Principal>,
        request: &CompletedRequest,
    ) -> AppResult<Option<AuditRecord>> {
        let Some(entry) = self.build_entry(principal, request) else {
            return Ok(None);
        };
        let record = self.store.append(&entry).await?;
        debug!(
            audit_id = record.id,
            user_id = %entry.user_id,
            activity = %record.activity,
            status = %record.status,
            "Audit record appended"
        );
        Ok(Some(record))
    }

    /// Record a completed request. Store failures are logged and dropped.
    pub async fn record_activity(&self, principal: Option<&Principal>, request: &CompletedRequest) {
        if let Err(e) = self.try_record(principal, request).await {
            error!(
                error = %e,
                path = %request.path,
                method = %request.method,
                status_code = request.status_code,
                "Failed to record audit activity"
            );
        }
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
