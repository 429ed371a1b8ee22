//! Port interfaces for the maintenance gate

use async_trait::async_trait;
use veriprint_domain::Result;

/// Source of the site-wide maintenance flag
#[async_trait]
pub trait SiteStatusSource: Send + Sync {
    /// Fetch the current maintenance flag.
    ///
    /// Implementations must not cache: the gate asks once per request.
    async fn maintenance_mode(&self) -> Result<bool>;
}
