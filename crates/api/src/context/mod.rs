//! Application context - dependency injection container

use std::sync::Arc;

use veriprint_core::{BypassPolicy, MaintenanceGate, SiteStatusSource};
use veriprint_domain::{Config, Result};
use veriprint_infra::{DocumentClient, HttpSiteStatusSource};

/// Shared state handed to every handler and middleware.
///
/// Cheap to clone; everything inside is immutable or reference counted.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gate: MaintenanceGate,
    pub status: Arc<dyn SiteStatusSource>,
    pub documents: DocumentClient,
}

impl AppState {
    /// Wire the HTTP adapters from configuration.
    ///
    /// # Errors
    ///
    /// Returns `VeriprintError::Config` if the configuration does not
    /// validate (including a maintenance page path that cannot be routed) or
    /// an HTTP client cannot be built.
    pub fn from_config(config: Config) -> Result<Self> {
        veriprint_infra::config::validate(&config)?;
        let status: Arc<dyn SiteStatusSource> =
            Arc::new(HttpSiteStatusSource::from_config(&config.upstream)?);
        let documents = DocumentClient::from_config(&config.upstream)?;
        Ok(Self::new(config, status, documents))
    }

    /// Assemble state from already-built collaborators.
    pub fn new(config: Config, status: Arc<dyn SiteStatusSource>, documents: DocumentClient) -> Self {
        let policy = BypassPolicy::from_config(&config.maintenance);
        let gate = MaintenanceGate::new(policy, Arc::clone(&status));

        Self { config: Arc::new(config), gate, status, documents }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("gate", &self.gate)
            .field("documents", &self.documents)
            .finish_non_exhaustive()
    }
}
