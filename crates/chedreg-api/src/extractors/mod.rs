//! Custom Axum extractors.

pub mod auth;
pub mod client;

pub use auth::{AuthUser, CurrentPrincipal};
pub use client::{client_ip, user_agent};
