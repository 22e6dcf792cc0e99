//! Audit trail entities.

pub mod activity;
pub mod method;
pub mod model;
pub mod outcome;

pub use activity::ActivityKind;
pub use method::HttpMethod;
pub use model::{AuditEntry, AuditRecord, CreateAuditRecord};
pub use outcome::Outcome;
