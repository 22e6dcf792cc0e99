//! Handlers restricted by the role gate.

pub mod audit;
