//! Semantic activity classification of a request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a request did, independent of its raw HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audit_activity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// Sign-in attempt.
    Login,
    /// Sign-out.
    Logout,
    /// Data export.
    Export,
    /// Approval of a submission.
    Approve,
    /// Rejection of a submission.
    Reject,
    /// Generic creation (`POST`).
    Create,
    /// Generic update (`PUT`/`PATCH`).
    Update,
    /// Generic deletion (`DELETE`).
    Delete,
    /// Read-only navigation; the catch-all classification.
    View,
}

impl ActivityKind {
    /// Return the activity as its stored lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Export => "export",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::View => "view",
        }
    }

    /// Human label, e.g. `"Approve"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Logout => "Logout",
            Self::Export => "Export",
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::View => "View",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
