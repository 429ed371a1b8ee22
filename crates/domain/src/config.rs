//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ANALYTICS_BASE_URL, DEFAULT_ASSET_PREFIXES, DEFAULT_BIND_ADDR,
    DEFAULT_DOCUMENTS_BASE_URL, DEFAULT_FLUSH_INTERVAL_MS, DEFAULT_MAINTENANCE_PATH,
    DEFAULT_STATUS_BASE_URL, DEFAULT_UNLOAD_TIMEOUT_MS, DEFAULT_UPSTREAM_TIMEOUT_MS,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub maintenance: MaintenanceConfig,
    pub activity: ActivityConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: DEFAULT_BIND_ADDR.to_string(), log_json: false }
    }
}

/// Base URLs of the external collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub status_base_url: String,
    pub documents_base_url: String,
    pub analytics_base_url: String,
    pub timeout_ms: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            status_base_url: DEFAULT_STATUS_BASE_URL.to_string(),
            documents_base_url: DEFAULT_DOCUMENTS_BASE_URL.to_string(),
            analytics_base_url: DEFAULT_ANALYTICS_BASE_URL.to_string(),
            timeout_ms: DEFAULT_UPSTREAM_TIMEOUT_MS,
        }
    }
}

/// Maintenance gate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// Path of the maintenance page; always exempt from the gate.
    pub page_path: String,
    /// Additional paths served normally even in maintenance mode.
    pub exempt_paths: Vec<String>,
    /// Path prefixes that never reach the status upstream.
    pub asset_prefixes: Vec<String>,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            page_path: DEFAULT_MAINTENANCE_PATH.to_string(),
            exempt_paths: Vec::new(),
            asset_prefixes: DEFAULT_ASSET_PREFIXES.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Activity reporter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    pub flush_interval_ms: u64,
    pub unload_timeout_ms: u64,
}

impl ActivityConfig {
    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }

    pub fn unload_timeout(&self) -> Duration {
        Duration::from_millis(self.unload_timeout_ms)
    }
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            flush_interval_ms: DEFAULT_FLUSH_INTERVAL_MS,
            unload_timeout_ms: DEFAULT_UNLOAD_TIMEOUT_MS,
        }
    }
}
