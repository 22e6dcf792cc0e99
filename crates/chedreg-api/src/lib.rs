//! # chedreg-api
//!
//! HTTP API layer built on Axum.
//!
//! Provides the audit listing and export endpoints, the activity recording
//! middleware that audits every authenticated request, the per-route role
//! gate, extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use router::{build_router, build_router_with, gated, named};
pub use state::AppState;
