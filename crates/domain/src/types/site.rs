//! Site status types and the maintenance gate decision

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VeriprintError};
use crate::impl_wire_enum_conversions;

/// Response of the CMS "site header" endpoint.
///
/// Only the maintenance flag is modelled; the rest of the payload is ignored.
/// Every level is optional so that a missing flag surfaces as a
/// [`VeriprintError::MalformedResponse`] from [`SiteHeaderResponse::maintenance_mode`]
/// rather than as a generic decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteHeaderResponse {
    #[serde(default)]
    pub data: Option<SiteHeaderData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteHeaderData {
    #[serde(default)]
    pub status: Option<SiteStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteStatus {
    #[serde(default)]
    pub maintenance_mode: Option<bool>,
}

impl SiteHeaderResponse {
    /// Read `data.status.maintenance_mode`.
    pub fn maintenance_mode(&self) -> Result<bool> {
        self.data
            .as_ref()
            .and_then(|data| data.status.as_ref())
            .and_then(|status| status.maintenance_mode)
            .ok_or_else(|| {
                VeriprintError::MalformedResponse(
                    "site header is missing data.status.maintenance_mode".to_string(),
                )
            })
    }
}

/// Per-request outcome of the maintenance gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateDecision {
    /// Serve the request as addressed.
    Passthrough,
    /// Serve the maintenance page in place of the requested one.
    Maintenance,
}

impl_wire_enum_conversions!(GateDecision {
    Passthrough => "passthrough",
    Maintenance => "maintenance",
});
