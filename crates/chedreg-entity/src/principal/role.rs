//! Normalized role categories derived from a principal's role type.

use serde::{Serialize, Serializer};
use std::fmt;

/// Normalized organizational role categories.
///
/// A principal can belong to several categories at once: `ChedAdmin` is the
/// union of `Ched` and `ChedLo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    /// Central CHED office staff.
    Ched,
    /// CHED liaison officer.
    ChedLo,
    /// Any CHED staff (`Ched` or `ChedLo`).
    ChedAdmin,
    /// A role type that is not CHED staff.
    Other,
}

impl RoleCategory {
    /// All categories, in declaration order.
    pub const ALL: [RoleCategory; 4] = [Self::Ched, Self::ChedLo, Self::ChedAdmin, Self::Other];

    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ched => "ched",
            Self::ChedLo => "ched_lo",
            Self::ChedAdmin => "ched_admin",
            Self::Other => "other",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Ched => 0b0001,
            Self::ChedLo => 0b0010,
            Self::ChedAdmin => 0b0100,
            Self::Other => 0b1000,
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of role categories a principal satisfies.
///
/// Computed once when the principal is loaded; callers test membership with
/// [`RoleCategories::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleCategories(u8);

impl RoleCategories {
    /// The empty set (no principal).
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Classify a role type by its display name and slug.
    ///
    /// Both fields are compared upper-cased with surrounding whitespace
    /// removed. A principal that is not CHED staff is `Other`.
    pub fn classify(name: Option<&str>, slug: Option<&str>) -> Self {
        let name = normalize(name);
        let slug = normalize(slug);

        let mut set = Self::empty();
        if name == "CHED" || slug == "CHED" {
            set.insert(RoleCategory::Ched);
        }
        if name == "CHED LO" || slug == "CHED-LO" {
            set.insert(RoleCategory::ChedLo);
        }
        if set.contains(RoleCategory::Ched) || set.contains(RoleCategory::ChedLo) {
            set.insert(RoleCategory::ChedAdmin);
        } else {
            set.insert(RoleCategory::Other);
        }
        set
    }

    /// Add a category to the set.
    pub fn insert(&mut self, category: RoleCategory) {
        self.0 |= category.bit();
    }

    /// Check membership.
    pub fn contains(&self, category: RoleCategory) -> bool {
        self.0 & category.bit() != 0
    }

    /// Whether no category is present.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate over the categories in the set.
    pub fn iter(&self) -> impl Iterator<Item = RoleCategory> + '_ {
        RoleCategory::ALL
            .into_iter()
            .filter(move |c| self.contains(*c))
    }
}

impl Serialize for RoleCategories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

fn normalize(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_uppercase()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ched_by_name_or_slug() {
        let by_name = RoleCategories::classify(Some("ched"), None);
        assert!(by_name.contains(RoleCategory::Ched));
        assert!(by_name.contains(RoleCategory::ChedAdmin));
        assert!(!by_name.contains(RoleCategory::ChedLo));

        let by_slug = RoleCategories::classify(Some("Commission"), Some("ched"));
        assert!(by_slug.contains(RoleCategory::Ched));
        assert!(!by_slug.contains(RoleCategory::Other));
    }

    #[test]
    fn test_ched_lo_is_admin_but_not_ched() {
        let set = RoleCategories::classify(Some("Ched Lo"), Some("something-else"));
        assert!(set.contains(RoleCategory::ChedLo));
        assert!(set.contains(RoleCategory::ChedAdmin));
        assert!(!set.contains(RoleCategory::Ched));

        let by_slug = RoleCategories::classify(None, Some("ched-lo"));
        assert!(by_slug.contains(RoleCategory::ChedLo));
    }

    #[test]
    fn test_other_role() {
        let set = RoleCategories::classify(Some("HEI"), Some("hei"));
        assert!(set.contains(RoleCategory::Other));
        assert!(!set.contains(RoleCategory::ChedAdmin));

        let missing = RoleCategories::classify(None, Some(""));
        assert_eq!(missing.iter().collect::<Vec<_>>(), vec![RoleCategory::Other]);
    }

    #[test]
    fn test_lo_slug_with_space_is_not_lo() {
        let set = RoleCategories::classify(Some("CHED-LO"), Some("ched lo"));
        assert!(!set.contains(RoleCategory::ChedLo));
    }

    #[test]
    fn test_serializes_as_list() {
        let set = RoleCategories::classify(Some("CHED"), Some("ched"));
        let json = serde_json::to_value(set).unwrap();
        assert_eq!(json, serde_json::json!(["ched", "ched_admin"]));
        assert!(RoleCategories::empty().is_empty());
    }
}
