//! Request activity auditing: classification, description, recording and
//! querying.

pub mod classifier;
pub mod describe;
pub mod query;
pub mod recorder;
pub mod status;

pub use query::{AppliedFilters, AuditActor, AuditListing, AuditQuery, AuditQueryService, AuditView};
pub use recorder::{AuditRecorder, CompletedRequest};
