//! Application constants
//!
//! Centralized location for domain-level defaults used throughout the site
//! server.

// Upstream defaults
pub const DEFAULT_STATUS_BASE_URL: &str = "https://cms.veriprint.example/api";
pub const DEFAULT_DOCUMENTS_BASE_URL: &str = "https://cms.veriprint.example/uploads";
pub const DEFAULT_ANALYTICS_BASE_URL: &str = "https://analytics.veriprint.example/v1";
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 3000;
pub const SITE_HEADER_PATH: &str = "/header?populate=status";

// Server
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const HEALTH_PATH: &str = "/health";
pub const API_PREFIX: &str = "/api";
pub const HEADER_REQUEST_ID: &str = "x-request-id";

// Maintenance gate
pub const DEFAULT_MAINTENANCE_PATH: &str = "/maintenance";
pub const DEFAULT_ASSET_PREFIXES: &[&str] = &[
    "/_next",
    "/static",
    "/images",
    "/media",
    "/fonts",
    "/css",
    "/api",
    "/favicon.ico",
    "/robots.txt",
    "/sitemap.xml",
];
pub const HEADER_ORIGINAL_PATH: &str = "x-original-path";
pub const HEADER_MAINTENANCE_MODE: &str = "x-maintenance-mode";

// Activity reporting
pub const DEFAULT_FLUSH_INTERVAL_MS: u64 = 4000;
pub const DEFAULT_UNLOAD_TIMEOUT_MS: u64 = 2000;

// Document proxies
pub const MAX_DOCUMENT_PATH_LENGTH: usize = 512;
pub const DOCUMENT_CACHE_CONTROL: &str = "public, max-age=3600";
pub const HERO_FONT_STYLESHEET: &str =
    "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap";
pub const HERO_FONT_FAMILY: &str = "'Inter', 'Helvetica Neue', Arial, sans-serif";
