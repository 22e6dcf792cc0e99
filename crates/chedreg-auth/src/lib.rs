//! # chedreg-auth
//!
//! Authentication and authorization for the audit subsystem.
//!
//! ## Modules
//!
//! - `jwt`: access token issuing and validation
//! - `rbac`: role gate over classified role categories

pub mod jwt;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use rbac::{RequiredRole, RoleGate};
