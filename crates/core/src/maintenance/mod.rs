//! Site-wide maintenance mode
//!
//! The gate consults a [`SiteStatusSource`] once per non-exempt request and
//! picks between serving the request and serving the maintenance page.

pub mod gate;
pub mod policy;
pub mod ports;

pub use gate::MaintenanceGate;
pub use policy::BypassPolicy;
pub use ports::SiteStatusSource;
