//! Storage seams for the audit trail and principal lookup.

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, Utc};
use uuid::Uuid;

use chedreg_core::result::AppResult;
use chedreg_core::types::pagination::{PageRequest, PageResponse};
use chedreg_entity::audit::{AuditEntry, AuditRecord, CreateAuditRecord, Outcome};
use chedreg_entity::principal::Principal;

/// Append-only audit record storage.
///
/// Implementations never update or delete records. Searches always exclude
/// plain `view` records and return entries ordered by `created_at DESC, id
/// DESC`.
#[async_trait]
pub trait AuditStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append a new record and return it with its assigned ID and timestamp.
    async fn append(&self, data: &CreateAuditRecord) -> AppResult<AuditRecord>;

    /// Search the trail with the given filters.
    async fn search(
        &self,
        filter: &AuditSearch,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditEntry>>;
}

/// Read-only lookup of principals and their role types.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Load a principal by user ID.
    async fn find_principal(&self, id: Uuid) -> AppResult<Option<Principal>>;
}

/// Normalized audit search filters. All present filters must match; the
/// free-text term matches if any searchable field contains it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditSearch {
    /// Exact outcome.
    pub status: Option<Outcome>,
    /// Case-insensitive substring.
    pub search: Option<String>,
    /// Inclusive lower bound on the UTC calendar date of `created_at`.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the UTC calendar date of `created_at`.
    pub to: Option<NaiveDate>,
}

impl AuditSearch {
    /// Lower timestamp bound (inclusive).
    pub fn lower_bound(&self) -> Option<DateTime<Utc>> {
        self.from
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Upper timestamp bound (exclusive): midnight after `to`.
    pub fn upper_bound(&self) -> Option<DateTime<Utc>> {
        self.to
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

/// Build an `ILIKE` pattern that matches `term` literally anywhere.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
