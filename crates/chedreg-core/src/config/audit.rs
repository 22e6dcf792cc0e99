//! Audit trail configuration.

use serde::{Deserialize, Serialize};

/// Settings for the request audit recorder and the audit listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Role required to read the audit trail: `ched`, `ched_lo`,
    /// `ched_admin`, or `participant`. Parsed when the router is built.
    #[serde(default = "default_viewer_role")]
    pub viewer_role: String,
    /// Upper bound for a single listing query, in seconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout_seconds: u64,
    /// Maximum number of rows returned by an export.
    #[serde(default = "default_export_max_rows")]
    pub export_max_rows: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            viewer_role: default_viewer_role(),
            query_timeout_seconds: default_query_timeout(),
            export_max_rows: default_export_max_rows(),
        }
    }
}

fn default_viewer_role() -> String {
    "ched_admin".to_string()
}

fn default_query_timeout() -> u64 {
    5
}

fn default_export_max_rows() -> u64 {
    10_000
}
