//! # Veriprint Web
//!
//! HTTP server for the Veriprint site.
//!
//! This crate contains:
//! - The axum router and its handlers (catalogue and hero proxies,
//!   maintenance page, health check)
//! - Request middleware (maintenance gate, request tracing)
//! - Application state wiring and the `veriprint` binary
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the infra adapters into the core components

pub mod context;
pub mod errors;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::AppState;
pub use errors::ApiError;
pub use router::app;
