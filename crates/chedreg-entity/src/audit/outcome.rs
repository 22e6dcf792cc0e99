//! Coarse outcome of an audited request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result bucket of a request, used for audit filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audit_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The request ended with a client or server error.
    Failed,
    /// The request ended with a redirect.
    Warning,
    /// A read-only navigation completed.
    Info,
    /// A state-changing action completed.
    Success,
}

impl Outcome {
    /// Return the outcome as its stored lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Failed => "failed",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = chedreg_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "failed" => Ok(Self::Failed),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            _ => Err(chedreg_core::AppError::validation(format!(
                "Invalid audit status: '{s}'. Expected one of: failed, warning, info, success"
            ))),
        }
    }
}
