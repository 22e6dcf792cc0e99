//! # chedreg-service
//!
//! Service layer for the audit subsystem. The recorder turns completed,
//! authenticated requests into audit records; the query service reads the
//! trail back as paginated view models.
//!
//! Services follow constructor injection: stores are provided at
//! construction time as `Arc<dyn AuditStore>`.

pub mod audit;
pub mod context;

pub use audit::{
    AuditListing, AuditQuery, AuditQueryService, AuditRecorder, AuditView, CompletedRequest,
};
pub use context::RequestContext;
