//! Router assembly
//!
//! Routes live in an inner router. The outer router has no routes of its own
//! and hands everything to the inner one as its fallback service, so the
//! middleware layered on the outer router runs before any route is matched.
//! That ordering is what lets the maintenance gate rewrite the URI.

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{any, get};
use axum::Router;
use veriprint_domain::constants::HEALTH_PATH;

use crate::context::AppState;
use crate::middleware::{maintenance_middleware, request_tracing_middleware};
use crate::routes;

/// Routes without the request-level middleware.
pub fn routes(state: AppState) -> Router {
    let maintenance_path = state.gate.maintenance_path().to_string();

    Router::new()
        .route("/api/catalogue", get(routes::catalogue))
        .route("/api/hero", get(routes::hero))
        .route(HEALTH_PATH, get(routes::health))
        .route(&maintenance_path, any(routes::maintenance_page))
        .fallback(routes::not_found)
        .with_state(state)
}

/// The full application: request tracing, then the maintenance gate, then
/// routing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .fallback_service(routes(state.clone()))
        .layer(from_fn_with_state(state, maintenance_middleware))
        .layer(from_fn(request_tracing_middleware))
}
