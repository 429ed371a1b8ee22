//! Visit and interaction telemetry
//!
//! [`ActivityReporter`] owns one page session: it records the visit, buffers
//! click/scroll events and flushes them to an [`AnalyticsBackend`] on a fixed
//! interval.

pub mod ports;
pub mod queue;
pub mod reporter;

pub use ports::AnalyticsBackend;
pub use queue::ActivityQueue;
pub use reporter::{ActivityReporter, ReporterConfig, ReporterError};
