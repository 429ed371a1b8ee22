//! Configuration loading and management
//!
//! This module provides utilities for loading the site server configuration
//! from config files and environment variables.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths, validate};
