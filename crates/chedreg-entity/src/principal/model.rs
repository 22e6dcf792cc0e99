//! Principal entity model.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::role::RoleCategories;

/// The role type a user is attached to (`role_types` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleType {
    /// Role type identifier.
    pub id: i64,
    /// Display name (e.g. `"CHED LO"`).
    pub name: String,
    /// URL-safe slug (e.g. `"ched-lo"`).
    pub slug: String,
}

/// An authenticated actor, as seen by the audit subsystem.
///
/// Principals are read-only here; their role categories are computed once
/// at construction.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Attached role type, if any.
    pub role_type: Option<RoleType>,
    /// Role categories derived from `role_type`.
    pub categories: RoleCategories,
}

impl Principal {
    /// Build a principal and classify its role type.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        email: impl Into<String>,
        role_type: Option<RoleType>,
    ) -> Self {
        let categories = RoleCategories::classify(
            role_type.as_ref().map(|r| r.name.as_str()),
            role_type.as_ref().map(|r| r.slug.as_str()),
        );
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role_type,
            categories,
        }
    }

    /// The role type's display name, if any.
    pub fn role_name(&self) -> Option<&str> {
        self.role_type.as_ref().map(|r| r.name.as_str())
    }
}

/// Flat row for `users LEFT JOIN role_types`.
#[derive(Debug, Clone, FromRow)]
pub struct PrincipalRow {
    /// User ID.
    pub id: Uuid,
    /// User display name.
    pub name: String,
    /// User email.
    pub email: String,
    /// Role type ID (absent when the user has none).
    pub role_type_id: Option<i64>,
    /// Role type name.
    pub role_type_name: Option<String>,
    /// Role type slug.
    pub role_type_slug: Option<String>,
}

impl From<PrincipalRow> for Principal {
    fn from(row: PrincipalRow) -> Self {
        let role_type = match (row.role_type_id, row.role_type_name, row.role_type_slug) {
            (Some(id), Some(name), Some(slug)) => Some(RoleType { id, name, slug }),
            _ => None,
        };
        Principal::new(row.id, row.name, row.email, role_type)
    }
}
