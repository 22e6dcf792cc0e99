//! Role gate: decides whether a principal may reach a route that requires a
//! given role.

use std::fmt;
use std::str::FromStr;

use chedreg_core::error::AppError;
use chedreg_core::result::AppResult;
use chedreg_entity::principal::{Principal, RoleCategories, RoleCategory};

/// The role a route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredRole {
    /// Central CHED office staff.
    Ched,
    /// CHED liaison officer.
    ChedLo,
    /// Any CHED staff.
    ChedAdmin,
    /// Institution-side users; CHED staff are excluded.
    Participant,
}

impl RequiredRole {
    /// Return the role as its configuration string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ched => "ched",
            Self::ChedLo => "ched_lo",
            Self::ChedAdmin => "ched_admin",
            Self::Participant => "participant",
        }
    }

    /// Whether a principal with `categories` satisfies this requirement.
    pub fn admits(&self, categories: &RoleCategories) -> bool {
        match self {
            Self::Ched => categories.contains(RoleCategory::Ched),
            Self::ChedLo => categories.contains(RoleCategory::ChedLo),
            Self::ChedAdmin => categories.contains(RoleCategory::ChedAdmin),
            Self::Participant => !categories.contains(RoleCategory::ChedAdmin),
        }
    }
}

impl fmt::Display for RequiredRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequiredRole {
    type Err = AppError;

    /// Parses a role name from configuration. Accepts `ched`, `ched_lo`,
    /// `ched_admin` and `participant` in any case, with `-` or `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "ched" => Ok(Self::Ched),
            "ched_lo" => Ok(Self::ChedLo),
            "ched_admin" => Ok(Self::ChedAdmin),
            "participant" => Ok(Self::Participant),
            other => Err(AppError::configuration(format!(
                "Unknown required role '{other}'"
            ))),
        }
    }
}

/// Stateless authorization check over classified role categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleGate;

impl RoleGate {
    /// Authorize `principal` for a route requiring `required`.
    ///
    /// Absence of a principal is reported as unauthenticated. A denial is a
    /// generic forbidden error that does not name the rule.
    pub fn authorize(principal: Option<&Principal>, required: RequiredRole) -> AppResult<()> {
        let Some(principal) = principal else {
            return Err(AppError::unauthorized("Authentication required"));
        };

        if required.admits(&principal.categories) {
            Ok(())
        } else {
            tracing::debug!(
                user_id = %principal.id,
                required = %required,
                "Role gate denied request"
            );
            Err(AppError::forbidden("Forbidden"))
        }
    }
}
