//! PostgreSQL repository implementations.

pub mod audit;
pub mod principal;

pub use audit::AuditLogRepository;
pub use principal::PrincipalRepository;
