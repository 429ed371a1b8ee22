//! # Veriprint Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with retry and timeout support
//! - Analytics backend, site-status and documents adapters
//! - Configuration loading (files and environment)
//! - Logging setup and error conversions
//!
//! ## Architecture
//! - Implements traits defined in `veriprint-core`
//! - Depends on `veriprint-domain` and `veriprint-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod analytics;
pub mod config;
pub mod documents;
pub mod errors;
pub mod http;
pub mod observability;
pub mod site_status;

// Re-export commonly used items
pub use analytics::HttpAnalyticsBackend;
pub use documents::DocumentClient;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::init_logging;
pub use site_status::HttpSiteStatusSource;
