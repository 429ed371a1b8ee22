//! Port interfaces for visit and activity reporting
//!
//! The analytics backend owns the wire format; the reporter only needs these
//! three calls and treats each as an opaque, fallible, asynchronous operation.

use async_trait::async_trait;
use veriprint_domain::{ActivityEvent, Result, VisitId};

/// Trait for the analytics backend that receives visit telemetry
#[async_trait]
pub trait AnalyticsBackend: Send + Sync {
    /// Record a new visit and return the identifier the backend assigned
    async fn record_visit(&self, started_at: chrono::DateTime<chrono::Utc>) -> Result<VisitId>;

    /// Update a recorded visit with the time spent on the page
    async fn update_visit(&self, visit_id: &VisitId, time_on_page_ms: u64) -> Result<()>;

    /// Report one batch of interaction events, in the order they occurred
    async fn report_activity(
        &self,
        visit_id: Option<&VisitId>,
        events: &[ActivityEvent],
    ) -> Result<()>;
}
