//! Per-request maintenance decision
//!
//! Fail-open: if the status upstream cannot answer, the request is served
//! as addressed.

use std::sync::Arc;

use tracing::{debug, info, warn};
use veriprint_domain::GateDecision;

use super::policy::BypassPolicy;
use super::ports::SiteStatusSource;

/// Decides, per request path, whether to serve the maintenance page.
///
/// Holds no mutable state; concurrent evaluations are independent.
#[derive(Clone)]
pub struct MaintenanceGate {
    policy: BypassPolicy,
    status: Arc<dyn SiteStatusSource>,
}

impl MaintenanceGate {
    pub fn new(policy: BypassPolicy, status: Arc<dyn SiteStatusSource>) -> Self {
        Self { policy, status }
    }

    /// Path of the page served while maintenance mode is on.
    pub fn maintenance_path(&self) -> &str {
        self.policy.page_path()
    }

    /// Evaluate one request path.
    ///
    /// Bypassed paths return [`GateDecision::Passthrough`] without an
    /// upstream call. Everything else costs exactly one status fetch.
    pub async fn evaluate(&self, path: &str) -> GateDecision {
        if self.policy.is_bypassed(path) {
            debug!(path, "maintenance check bypassed");
            return GateDecision::Passthrough;
        }

        match self.status.maintenance_mode().await {
            Ok(true) => {
                info!(path, "maintenance mode on; serving maintenance page");
                GateDecision::Maintenance
            }
            Ok(false) => GateDecision::Passthrough,
            Err(err) => {
                warn!(path, error = %err, "site status unavailable; failing open");
                GateDecision::Passthrough
            }
        }
    }
}

impl std::fmt::Debug for MaintenanceGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaintenanceGate").field("policy", &self.policy).finish_non_exhaustive()
    }
}
