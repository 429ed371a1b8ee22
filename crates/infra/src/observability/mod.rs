//! Logging setup for the site server

pub mod logging;

pub use logging::{env_filter, init_logging};
