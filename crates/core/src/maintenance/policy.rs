//! Which request paths skip the maintenance check entirely

use veriprint_domain::constants::HEALTH_PATH;
use veriprint_domain::MaintenanceConfig;

/// Allow-list and asset-prefix rules for the maintenance gate.
///
/// Bypassed paths never reach the status upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BypassPolicy {
    page_path: String,
    exempt_paths: Vec<String>,
    asset_prefixes: Vec<String>,
}

impl BypassPolicy {
    pub fn new(
        page_path: impl Into<String>,
        exempt_paths: impl IntoIterator<Item = impl Into<String>>,
        asset_prefixes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let page_path: String = page_path.into();
        Self {
            page_path: normalize(&page_path).to_string(),
            exempt_paths: exempt_paths
                .into_iter()
                .map(|p| {
                    let p: String = p.into();
                    normalize(&p).to_string()
                })
                .collect(),
            asset_prefixes: asset_prefixes
                .into_iter()
                .map(|p| {
                    let p: String = p.into();
                    p.trim_end_matches('/').to_string()
                })
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Policy for the running server: the configured rules plus the health
    /// endpoint, which probes must reach during maintenance.
    pub fn from_config(config: &MaintenanceConfig) -> Self {
        Self::new(
            config.page_path.as_str(),
            config.exempt_paths.iter().map(String::as_str).chain(std::iter::once(HEALTH_PATH)),
            config.asset_prefixes.iter().map(String::as_str),
        )
    }

    /// Path the gate rewrites to while maintenance mode is on.
    pub fn page_path(&self) -> &str {
        &self.page_path
    }

    /// Whether `path` passes through without consulting the status upstream.
    pub fn is_bypassed(&self, path: &str) -> bool {
        self.is_allow_listed(path) || self.is_asset(path)
    }

    fn is_allow_listed(&self, path: &str) -> bool {
        let path = normalize(path);
        path == self.page_path || self.exempt_paths.iter().any(|exempt| exempt == path)
    }

    fn is_asset(&self, path: &str) -> bool {
        self.asset_prefixes.iter().any(|prefix| {
            path.strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

/// Drop a trailing slash, keeping `/` itself.
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
