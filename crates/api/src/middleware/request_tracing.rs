use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;
use veriprint_domain::constants::HEADER_REQUEST_ID;

const MAX_REQUEST_ID_LEN: usize = 128;

/// Wrap each request in an `http.request` span and echo its request id.
pub async fn request_tracing_middleware(request: Request<Body>, next: Next) -> Response {
    let request_id = request_id(request.headers());
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %method,
        path = %path,
        status = tracing::field::Empty,
    );

    let mut response = next.run(request).instrument(span.clone()).await;
    span.record("status", response.status().as_u16());
    span.in_scope(|| tracing::debug!("request completed"));

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(HEADER_REQUEST_ID, value);
    }
    response
}

/// Reuse a sane incoming `x-request-id`, otherwise mint a UUIDv7.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(HEADER_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .filter(|id| id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        .map_or_else(|| Uuid::now_v7().to_string(), ToString::to_string)
}
