//! In-memory audit store and principal directory for single-process use
//! and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use chedreg_core::result::AppResult;
use chedreg_core::types::pagination::{PageRequest, PageResponse};
use chedreg_entity::audit::{ActivityKind, AuditEntry, AuditRecord, CreateAuditRecord};
use chedreg_entity::principal::Principal;

use crate::store::{AuditSearch, AuditStore, PrincipalDirectory};

#[derive(Debug, Default)]
struct InnerState {
    records: Vec<AuditRecord>,
    principals: HashMap<Uuid, Principal>,
    next_id: i64,
}

/// Audit store backed by a Tokio `RwLock`.
///
/// Mirrors the PostgreSQL search semantics, including the join against
/// principals and their role types.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryAuditStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a principal.
    pub async fn insert_principal(&self, principal: Principal) {
        let mut state = self.state.write().await;
        state.principals.insert(principal.id, principal);
    }

    /// Removes a principal. Its audit records keep a dangling reference.
    pub async fn remove_principal(&self, id: Uuid) -> bool {
        let mut state = self.state.write().await;
        state.principals.remove(&id).is_some()
    }

    /// Snapshot of every stored record in insertion order.
    pub async fn records(&self) -> Vec<AuditRecord> {
        self.state.read().await.records.clone()
    }

    /// Number of stored records, including plain views.
    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    /// Whether no record has been stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn append(&self, data: &CreateAuditRecord) -> AppResult<AuditRecord> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let record = AuditRecord {
            id: state.next_id,
            user_id: Some(data.user_id),
            route_name: data.route_name.clone(),
            path: data.path.clone(),
            method: data.method,
            activity: data.activity,
            description: data.description.clone(),
            status: data.status,
            ip_address: data.ip_address.clone(),
            user_agent: data.user_agent.clone(),
            created_at: Utc::now(),
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn search(
        &self,
        filter: &AuditSearch,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditEntry>> {
        let state = self.state.read().await;
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let lower = filter.lower_bound();
        let upper = filter.upper_bound();

        let mut matched: Vec<(&AuditRecord, Option<&Principal>)> = state
            .records
            .iter()
            .filter(|r| r.activity != ActivityKind::View)
            .filter(|r| filter.status.is_none_or(|s| r.status == s))
            .filter(|r| lower.is_none_or(|lo| r.created_at >= lo))
            .filter(|r| upper.is_none_or(|hi| r.created_at < hi))
            .map(|r| {
                let principal = r.user_id.and_then(|id| state.principals.get(&id));
                (r, principal)
            })
            .filter(|(r, p)| {
                needle
                    .as_deref()
                    .is_none_or(|n| text_matches(r, *p, n))
            })
            .collect();

        matched.sort_by(|(a, _), (b, _)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .map(|(record, principal)| AuditEntry {
                record: record.clone(),
                actor_name: principal.map(|p| p.name.clone()),
                actor_email: principal.map(|p| p.email.clone()),
                actor_role: principal.and_then(|p| p.role_name().map(String::from)),
            })
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }
}

#[async_trait]
impl PrincipalDirectory for MemoryAuditStore {
    async fn find_principal(&self, id: Uuid) -> AppResult<Option<Principal>> {
        Ok(self.state.read().await.principals.get(&id).cloned())
    }
}

/// Case-insensitive substring match over every searchable field. `needle`
/// is already lower-cased.
fn text_matches(record: &AuditRecord, principal: Option<&Principal>, needle: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(needle);
    let contains_opt = |value: Option<&str>| value.is_some_and(contains);

    contains_opt(record.route_name.as_deref())
        || contains(&record.path)
        || contains(record.activity.as_str())
        || contains(record.status.as_str())
        || contains(&record.description)
        || contains_opt(record.ip_address.as_deref())
        || contains_opt(record.user_agent.as_deref())
        || principal.is_some_and(|p| {
            contains(&p.name)
                || contains(&p.email)
                || p
                    .role_type
                    .as_ref()
                    .is_some_and(|r| contains(&r.name) || contains(&r.slug))
        })
}
