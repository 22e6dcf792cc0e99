//! Audit record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::activity::ActivityKind;
use super::method::HttpMethod;
use super::outcome::Outcome;

/// An immutable record describing one classified, authenticated request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AuditRecord {
    /// Unique, monotonically assigned identifier.
    pub id: i64,
    /// The acting principal. `None` once the user has been removed.
    pub user_id: Option<Uuid>,
    /// Logical route name (e.g. `"programmes.approve"`).
    pub route_name: Option<String>,
    /// Request path, always starting with `/`.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Semantic activity classification.
    pub activity: ActivityKind,
    /// Human-readable sentence, computed once at write time.
    pub description: String,
    /// Coarse outcome.
    pub status: Outcome,
    /// Client IP as received.
    pub ip_address: Option<String>,
    /// Client User-Agent as received.
    pub user_agent: Option<String>,
    /// When the request completed.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAuditRecord {
    /// The acting principal.
    pub user_id: Uuid,
    /// Logical route name.
    pub route_name: Option<String>,
    /// Normalized request path.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Activity classification.
    pub activity: ActivityKind,
    /// Description sentence.
    pub description: String,
    /// Resolved outcome.
    pub status: Outcome,
    /// Client IP.
    pub ip_address: Option<String>,
    /// Client User-Agent.
    pub user_agent: Option<String>,
}

/// An audit record joined with its principal and role type, as returned by
/// searches.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditEntry {
    /// The stored record.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub record: AuditRecord,
    /// Principal display name (absent when the reference is broken).
    pub actor_name: Option<String>,
    /// Principal email.
    pub actor_email: Option<String>,
    /// Role type display name of the principal.
    pub actor_role: Option<String>,
}
