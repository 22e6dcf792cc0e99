//! Audit trail search: lenient filter parsing, paginated listing, export,
//! and the view projection returned to operators.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use chedreg_core::error::AppError;
use chedreg_core::result::AppResult;
use chedreg_core::types::pagination::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, PageResponse,
};
use chedreg_database::store::{AuditSearch, AuditStore};
use chedreg_entity::audit::{ActivityKind, AuditEntry, HttpMethod, Outcome};

use super::describe;

const DATE_FORMAT: &str = "%Y-%m-%d";
const UNKNOWN_USER: &str = "Unknown user";

/// Normalized listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditQuery {
    /// Search filters.
    pub filter: AuditSearch,
    /// Requested page.
    pub page: PageRequest,
}

impl AuditQuery {
    /// Build a query from raw request parameters.
    ///
    /// Never fails: an unknown status or malformed date is ignored, a
    /// malformed `per_page` or `page` falls back to its default, `per_page`
    /// is clamped, and a blank search term is dropped.
    pub fn from_raw(
        status: Option<&str>,
        search: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
        per_page: Option<&str>,
        page: Option<&str>,
    ) -> Self {
        let status = non_blank(status).and_then(|s| match s.parse::<Outcome>() {
            Ok(outcome) => Some(outcome),
            Err(_) => {
                debug!(status = s, "Ignoring unknown audit status filter");
                None
            }
        });
        let search = non_blank(search).map(String::from);
        let per_page = parse_number(per_page).unwrap_or(DEFAULT_PAGE_SIZE);
        let page = parse_number(page).unwrap_or(1);

        Self {
            filter: AuditSearch {
                status,
                search,
                from: parse_date(from),
                to: parse_date(to),
            },
            page: PageRequest::new(page, per_page),
        }
    }

    /// The filters as they were applied, for echoing back to the caller.
    pub fn applied(&self) -> AppliedFilters {
        AppliedFilters {
            status: self.filter.status,
            search: self.filter.search.clone(),
            from: self.filter.from.map(|d| d.format(DATE_FORMAT).to_string()),
            to: self.filter.to.map(|d| d.format(DATE_FORMAT).to_string()),
            per_page: self.page.page_size,
            page: self.page.page,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(value: Option<&str>) -> Option<u64> {
    non_blank(value).and_then(|v| v.parse::<u64>().ok())
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    non_blank(value).and_then(|v| NaiveDate::parse_from_str(v, DATE_FORMAT).ok())
}

/// Normalized filters echoed next to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFilters {
    /// Outcome filter.
    pub status: Option<Outcome>,
    /// Trimmed search term.
    pub search: Option<String>,
    /// Lower date bound, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Upper date bound, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// Effective page size.
    pub per_page: u64,
    /// Effective page number.
    pub page: u64,
}

/// The acting user as shown in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditActor {
    /// Display name, or `"Unknown user"` when the user no longer exists.
    pub name: String,
    /// Lower-cased role type name.
    pub role: Option<String>,
}

/// One audit record as presented to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditView {
    /// Record id.
    pub id: i64,
    /// What the request did.
    pub activity: ActivityKind,
    /// How the request ended.
    pub status: Outcome,
    /// HTTP method of the request.
    pub method: HttpMethod,
    /// One-line sentence, e.g. `Approve Programmes / Approve.`
    pub description: String,
    /// Humanized page label.
    pub page: String,
    /// Request path.
    pub link: String,
    /// Who made the request.
    pub user: AuditActor,
    /// Client address, when known.
    pub ip_address: Option<String>,
    /// Client `User-Agent`, when sent.
    pub user_agent: Option<String>,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

impl From<AuditEntry> for AuditView {
    fn from(entry: AuditEntry) -> Self {
        let record = entry.record;
        let user = match entry.actor_name {
            Some(name) => AuditActor {
                name,
                role: entry.actor_role.map(|r| r.to_lowercase()),
            },
            None => AuditActor {
                name: UNKNOWN_USER.to_string(),
                role: None,
            },
        };

        Self {
            id: record.id,
            activity: record.activity,
            status: record.status,
            method: record.method,
            page: describe::humanize_page(record.route_name.as_deref(), &record.path),
            link: record.path,
            description: record.description,
            user,
            ip_address: record.ip_address,
            user_agent: record.user_agent,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// A page of views plus the filters that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditListing {
    /// Newest-first page of non-view records.
    pub logs: PageResponse<AuditView>,
    /// Filters as they were applied.
    pub filters: AppliedFilters,
}

/// Read side of the audit trail.
#[derive(Debug, Clone)]
pub struct AuditQueryService {
    store: Arc<dyn AuditStore>,
    timeout: Duration,
}

impl AuditQueryService {
    /// Creates a query service. Each store read is bounded by `timeout`.
    pub fn new(store: Arc<dyn AuditStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// One page of matching records, newest first.
    pub async fn list(&self, query: &AuditQuery) -> AppResult<AuditListing> {
        let page = self.search_page(&query.filter, &query.page).await?;
        Ok(AuditListing {
            logs: page.map(AuditView::from),
            filters: query.applied(),
        })
    }

    /// Every matching record, newest first, up to `max_rows`. The page in
    /// `query` is ignored.
    pub async fn export(&self, query: &AuditQuery, max_rows: u64) -> AppResult<Vec<AuditView>> {
        let mut views = Vec::new();
        let mut page = PageRequest::new(1, MAX_PAGE_SIZE);

        while (views.len() as u64) < max_rows {
            let result = self.search_page(&query.filter, &page).await?;
            let has_next = result.has_next;
            views.extend(result.items.into_iter().map(AuditView::from));
            if !has_next {
                break;
            }
            page = page.next();
        }

        if views.len() as u64 > max_rows {
            warn!(max_rows, "Audit export truncated");
            views.truncate(max_rows as usize);
        }
        Ok(views)
    }

    async fn search_page(
        &self,
        filter: &AuditSearch,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditEntry>> {
        tokio::time::timeout(self.timeout, self.store.search(filter, page))
            .await
            .map_err(|_| {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Audit query timed out"
                );
                AppError::service_unavailable("Audit log query timed out")
            })?
    }
}
