//! Maintenance gate middleware
//!
//! Must wrap the router from the outside: the URI is rewritten before
//! routing, so the maintenance page handler serves the request while the
//! browser keeps the path it asked for.

use axum::body::Body;
use axum::extract::State;
use axum::http::uri::PathAndQuery;
use axum::http::{HeaderValue, Request, Uri};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;
use veriprint_domain::constants::{HEADER_MAINTENANCE_MODE, HEADER_ORIGINAL_PATH};
use veriprint_domain::GateDecision;

use crate::context::AppState;

pub async fn maintenance_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let original_path = request.uri().path().to_string();

    match state.gate.evaluate(&original_path).await {
        GateDecision::Passthrough => next.run(request).await,
        GateDecision::Maintenance => {
            let Some(rewritten) = rewrite_path(request.uri(), state.gate.maintenance_path()) else {
                warn!(path = %original_path, "could not rewrite to maintenance page; passing through");
                return next.run(request).await;
            };

            *request.uri_mut() = rewritten;
            if let Ok(value) = HeaderValue::from_str(&original_path) {
                request.headers_mut().insert(HEADER_ORIGINAL_PATH, value);
            }

            let mut response = next.run(request).await;
            response.headers_mut().insert(HEADER_MAINTENANCE_MODE, HeaderValue::from_static("on"));
            response
        }
    }
}

/// Replace the path of `uri`, keeping its query string.
fn rewrite_path(uri: &Uri, path: &str) -> Option<Uri> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>().ok()?);
    Uri::from_parts(parts).ok()
}
