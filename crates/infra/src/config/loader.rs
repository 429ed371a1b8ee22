//! Configuration loader
//!
//! Loads site server configuration from a config file and environment
//! variables.
//!
//! ## Loading Strategy
//! 1. Probe for a config file; start from defaults when none exists
//! 2. Overlay any `VERIPRINT_*` environment variables
//! 3. Validate upstream URLs, durations and the maintenance page path
//!
//! ## Environment Variables
//! - `VERIPRINT_BIND_ADDR`: Listener address
//! - `VERIPRINT_LOG_JSON`: Emit JSON logs (true/false)
//! - `VERIPRINT_STATUS_API_URL`: Base URL of the site-status API
//! - `VERIPRINT_DOCUMENTS_URL`: Base URL of the document uploads
//! - `VERIPRINT_ANALYTICS_URL`: Base URL of the analytics backend
//! - `VERIPRINT_UPSTREAM_TIMEOUT_MS`: Upstream request timeout
//! - `VERIPRINT_MAINTENANCE_EXEMPT`: Comma-separated paths exempt from the gate
//! - `VERIPRINT_ACTIVITY_FLUSH_MS`: Activity flush interval
//! - `VERIPRINT_ACTIVITY_UNLOAD_TIMEOUT_MS`: Bound on the final visit update
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./veriprint.json` or `./veriprint.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use url::Url;
use veriprint_domain::constants::{API_PREFIX, HEALTH_PATH};
use veriprint_domain::{Config, Result, VeriprintError};

/// Load configuration with automatic fallback strategy
///
/// Starts from the first probed config file (or defaults when none is
/// found), then applies environment overrides.
///
/// # Errors
/// Returns `VeriprintError::Config` if:
/// - A probed file exists but cannot be parsed
/// - An environment variable has an invalid value
/// - An upstream URL is not a valid absolute URL
pub fn load() -> Result<Config> {
    let base = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, starting from defaults");
            Config::default()
        }
    };

    let config = apply_env_overrides(base)?;
    validate(&config)?;
    tracing::info!(
        bind_addr = %config.server.bind_addr,
        status_base_url = %config.upstream.status_base_url,
        "Configuration loaded"
    );
    Ok(config)
}

/// Load configuration from defaults and environment variables only
///
/// # Errors
/// Returns `VeriprintError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let config = apply_env_overrides(Config::default())?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
/// Sections and fields missing from the file keep their defaults.
///
/// # Errors
/// Returns `VeriprintError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(VeriprintError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            VeriprintError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| VeriprintError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| VeriprintError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| VeriprintError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(VeriprintError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory and its two parents, then the
/// executable's directory and its two parents.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.is_file())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("veriprint.json"),
        dir.join("veriprint.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

fn apply_env_overrides(mut config: Config) -> Result<Config> {
    if let Some(addr) = env_opt("VERIPRINT_BIND_ADDR") {
        config.server.bind_addr = addr;
    }
    config.server.log_json = env_bool("VERIPRINT_LOG_JSON", config.server.log_json);

    if let Some(url) = env_opt("VERIPRINT_STATUS_API_URL") {
        config.upstream.status_base_url = url;
    }
    if let Some(url) = env_opt("VERIPRINT_DOCUMENTS_URL") {
        config.upstream.documents_base_url = url;
    }
    if let Some(url) = env_opt("VERIPRINT_ANALYTICS_URL") {
        config.upstream.analytics_base_url = url;
    }
    if let Some(timeout) = env_parse::<u64>("VERIPRINT_UPSTREAM_TIMEOUT_MS", "upstream timeout")? {
        config.upstream.timeout_ms = timeout;
    }

    if let Some(paths) = env_opt("VERIPRINT_MAINTENANCE_EXEMPT") {
        config.maintenance.exempt_paths = paths
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToString::to_string)
            .collect();
    }

    if let Some(ms) = env_parse::<u64>("VERIPRINT_ACTIVITY_FLUSH_MS", "activity flush interval")? {
        config.activity.flush_interval_ms = ms;
    }
    if let Some(ms) =
        env_parse::<u64>("VERIPRINT_ACTIVITY_UNLOAD_TIMEOUT_MS", "activity unload timeout")?
    {
        config.activity.unload_timeout_ms = ms;
    }

    Ok(config)
}

/// Reject configurations the server cannot run with.
///
/// # Errors
/// Returns `VeriprintError::Config` for non-absolute upstream URLs, zero
/// durations, or a maintenance page path that cannot be routed.
pub fn validate(config: &Config) -> Result<()> {
    for (name, value) in [
        ("status_base_url", &config.upstream.status_base_url),
        ("documents_base_url", &config.upstream.documents_base_url),
        ("analytics_base_url", &config.upstream.analytics_base_url),
    ] {
        let parsed = Url::parse(value)
            .map_err(|e| VeriprintError::Config(format!("Invalid {name} {value:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(VeriprintError::Config(format!(
                "Invalid {name} {value:?}: scheme must be http or https"
            )));
        }
    }

    if config.upstream.timeout_ms == 0 {
        return Err(VeriprintError::Config("upstream timeout must be non-zero".into()));
    }
    if config.activity.flush_interval_ms == 0 {
        return Err(VeriprintError::Config("activity flush interval must be non-zero".into()));
    }

    validate_page_path(&config.maintenance.page_path)
}

/// The maintenance page is mounted as a route and allow-listed by the gate,
/// so it must be an absolute path that shadows no other route.
fn validate_page_path(page_path: &str) -> Result<()> {
    let invalid = |reason: &str| {
        Err(VeriprintError::Config(format!("Invalid maintenance page_path {page_path:?}: {reason}")))
    };

    if !page_path.starts_with('/') {
        return invalid("must start with '/'");
    }
    if page_path == "/" {
        return invalid("cannot be the site root");
    }
    if page_path.contains("//") || page_path.chars().any(|c| c.is_whitespace() || c.is_control())
    {
        return invalid("must be a single clean path");
    }
    if page_path == HEALTH_PATH {
        return invalid("clashes with the health endpoint");
    }
    if page_path == API_PREFIX || page_path.starts_with(&format!("{API_PREFIX}/")) {
        return invalid("clashes with the /api routes");
    }

    Ok(())
}

/// Read an optional environment variable, treating blank values as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse an optional environment variable
///
/// # Errors
/// Returns `VeriprintError::Config` if the variable is set but does not parse.
fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| VeriprintError::Config(format!("Invalid {what} in {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
