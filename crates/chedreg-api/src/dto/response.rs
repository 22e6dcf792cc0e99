//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chedreg_entity::principal::{Principal, RoleCategory};
use chedreg_service::audit::{AppliedFilters, AuditView};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime.
    pub uptime_seconds: u64,
}

/// Role type summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleTypeResponse {
    pub name: String,
    pub slug: String,
}

/// The authenticated principal and its role categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role_type: Option<RoleTypeResponse>,
    pub categories: Vec<String>,
}

impl From<&Principal> for PrincipalResponse {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id,
            name: principal.name.clone(),
            email: principal.email.clone(),
            role_type: principal.role_type.as_ref().map(|r| RoleTypeResponse {
                name: r.name.clone(),
                slug: r.slug.clone(),
            }),
            categories: principal
                .categories
                .iter()
                .map(|c: RoleCategory| c.as_str().to_string())
                .collect(),
        }
    }
}

/// Body of an audit export attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditExportResponse {
    /// RFC 3339 export time.
    pub exported_at: String,
    /// Filters that selected the records.
    pub filters: AppliedFilters,
    /// Number of exported records.
    pub total: usize,
    /// Matching records, newest first.
    pub logs: Vec<AuditView>,
}
