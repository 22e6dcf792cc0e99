//! Request context carrying the authenticated principal and client details.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use chedreg_entity::principal::Principal;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer and handed to services that need to know who is
/// acting and from where.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated principal.
    pub principal: Principal,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(principal: Principal, ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            principal,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// The acting user's ID.
    pub fn user_id(&self) -> Uuid {
        self.principal.id
    }
}
