//! `GET /health`

use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::context::AppState;
use crate::utils::health::{ComponentHealth, HealthStatus};

/// Always answers `200`; an unreachable site-status upstream is reported but
/// does not fail the check, matching the gate's fail-open behaviour.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let config = ComponentHealth::healthy("config")
        .with_message(format!("listening on {}", state.config.server.bind_addr));

    let site_status = match state.status.maintenance_mode().await {
        Ok(on) => ComponentHealth::healthy("site_status")
            .with_message(format!("maintenance_mode={on}"))
            .advisory(),
        Err(err) => ComponentHealth::unhealthy("site_status", err.to_string()).advisory(),
    };

    let mut status = HealthStatus::new().add_component(config).add_component(site_status);
    status.calculate_score();
    debug!(is_healthy = status.is_healthy, score = status.score, "health check");

    Json(status)
}
