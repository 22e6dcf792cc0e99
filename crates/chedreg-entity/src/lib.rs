//! # chedreg-entity
//!
//! Domain entity models for the audit subsystem. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`, and enums stored in
//! PostgreSQL enum columns derive `sqlx::Type`.

pub mod audit;
pub mod principal;
