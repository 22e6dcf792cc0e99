//! Request DTOs.

use serde::{Deserialize, Serialize};

use chedreg_service::audit::AuditQuery;

/// Query string of the audit listing and export endpoints.
///
/// Every field is kept as raw text so that malformed values are ignored
/// rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditLogQuery {
    /// Outcome filter (`failed`, `warning`, `info`, `success`).
    pub status: Option<String>,
    /// Free-text search term.
    pub search: Option<String>,
    /// Inclusive start date, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// Page size.
    pub per_page: Option<String>,
    /// Page number.
    pub page: Option<String>,
}

impl AuditLogQuery {
    /// Normalize into a service query.
    pub fn into_query(self) -> AuditQuery {
        AuditQuery::from_raw(
            self.status.as_deref(),
            self.search.as_deref(),
            self.from.as_deref(),
            self.to.as_deref(),
            self.per_page.as_deref(),
            self.page.as_deref(),
        )
    }
}
