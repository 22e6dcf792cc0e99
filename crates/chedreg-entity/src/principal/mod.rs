//! Principal (acting user) entities.

pub mod model;
pub mod role;

pub use model::{Principal, PrincipalRow, RoleType};
pub use role::{RoleCategories, RoleCategory};
