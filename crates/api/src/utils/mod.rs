//! Helpers shared by the route handlers

pub mod health;

pub use health::{ComponentHealth, HealthStatus};
