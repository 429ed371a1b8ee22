//! # Veriprint Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The page-session activity reporter
//! - The maintenance gate and its bypass policy
//! - Document proxy validation and hero style injection
//! - Port interfaces (traits) for the analytics and site-status backends
//!
//! ## Architecture Principles
//! - Only depends on `veriprint-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod activity;
pub mod documents;
pub mod maintenance;

pub use activity::{
    ActivityQueue, ActivityReporter, AnalyticsBackend, ReporterConfig, ReporterError,
};
pub use documents::{hero_style_block, inject_style_block, CataloguePath, HeroFileName};
pub use maintenance::{BypassPolicy, MaintenanceGate, SiteStatusSource};
