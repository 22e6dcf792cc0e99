//! Role-based gating over classified role categories.

pub mod gate;

pub use gate::{RequiredRole, RoleGate};
