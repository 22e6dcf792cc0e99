//! # chedreg-database
//!
//! PostgreSQL connection management, migrations, the audit store traits,
//! and their PostgreSQL and in-memory implementations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryAuditStore;
pub use repositories::{AuditLogRepository, PrincipalRepository};
pub use store::{AuditSearch, AuditStore, PrincipalDirectory};
