//! # Veriprint Domain
//!
//! Business domain types and models for the Veriprint site server.
//!
//! This crate contains:
//! - Telemetry types (visits, activity events, batches)
//! - Site status types and the maintenance gate decision
//! - Domain error types and Result definitions
//! - Configuration structures and defaults
//!
//! ## Architecture
//! - No dependencies on other Veriprint crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
