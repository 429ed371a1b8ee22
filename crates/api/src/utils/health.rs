//! Health report types served by `GET /health`
//!
//! Components are either critical (the server cannot do its job without
//! them) or advisory (reported, never fatal). Only critical components
//! decide `is_healthy`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Overall health of the site server
///
/// # Example
/// ```
/// use veriprint_web::utils::health::{ComponentHealth, HealthStatus};
///
/// let mut status = HealthStatus::new()
///     .add_component(ComponentHealth::healthy("config"))
///     .add_component(ComponentHealth::unhealthy("site_status", "timed out").advisory());
/// status.calculate_score();
///
/// assert_eq!(status.score, 0.5);
/// assert!(status.is_healthy);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Whether every critical component is healthy
    pub is_healthy: bool,

    /// Share of healthy components, from 0.0 to 1.0
    pub score: f64,

    pub message: Option<String>,

    pub components: Vec<ComponentHealth>,

    /// Unix timestamp (seconds) when the check ran
    pub timestamp: i64,
}

impl HealthStatus {
    pub fn new() -> Self {
        Self {
            is_healthy: true,
            score: 1.0,
            message: None,
            components: Vec::new(),
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Recompute `score` and `is_healthy` from the components.
    ///
    /// Call after all components have been added.
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate_score(&mut self) {
        if self.components.is_empty() {
            return;
        }

        let healthy_count = self.components.iter().filter(|c| c.is_healthy).count();
        self.score = healthy_count as f64 / self.components.len() as f64;
        self.is_healthy = self.components.iter().all(|c| c.is_healthy || !c.critical);

        let failing: Vec<&str> = self
            .components
            .iter()
            .filter(|c| !c.is_healthy)
            .map(|c| c.name.as_str())
            .collect();
        self.message = (!failing.is_empty()).then(|| format!("degraded: {}", failing.join(", ")));
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health of one component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component identifier (e.g. "config", "site_status")
    pub name: String,

    pub is_healthy: bool,

    /// Whether a failure here makes the whole server unhealthy
    pub critical: bool,

    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, critical: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, critical: true, message: Some(message.into()) }
    }

    /// Mark the component as reported-only.
    pub fn advisory(mut self) -> Self {
        self.critical = false;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_new() {
        let status = HealthStatus::new();
        assert!(status.is_healthy);
        assert_eq!(status.score, 1.0);
        assert!(status.message.is_none());
        assert!(status.components.is_empty());
    }

    #[test]
    fn test_calculate_score_all_healthy() {
        let mut status = HealthStatus::new()
            .add_component(ComponentHealth::healthy("config"))
            .add_component(ComponentHealth::healthy("site_status"));

        status.calculate_score();

        assert_eq!(status.score, 1.0);
        assert!(status.is_healthy);
        assert!(status.message.is_none());
    }

    #[test]
    fn test_advisory_failure_is_not_fatal() {
        let mut status = HealthStatus::new()
            .add_component(ComponentHealth::healthy("config"))
            .add_component(ComponentHealth::unhealthy("site_status", "timeout").advisory());

        status.calculate_score();

        assert_eq!(status.score, 0.5);
        assert!(status.is_healthy);
        assert_eq!(status.message.as_deref(), Some("degraded: site_status"));
    }

    #[test]
    fn test_critical_failure_is_fatal() {
        let mut status = HealthStatus::new()
            .add_component(ComponentHealth::unhealthy("config", "missing"))
            .add_component(ComponentHealth::healthy("site_status").advisory());

        status.calculate_score();

        assert!(!status.is_healthy);
    }
}
