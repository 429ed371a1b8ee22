#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use veriprint_domain::{Config, UpstreamConfig};
use veriprint_web::{app, AppState};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// App wired against a wiremock server standing in for every upstream.
pub struct TestApp {
    pub server: MockServer,
    pub app: Router,
}

impl TestApp {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Start with a config adjusted by `customize` before the state is built.
    pub async fn start_with(customize: impl FnOnce(&mut Config)) -> Self {
        let server = MockServer::start().await;
        let mut config = upstream_config(&server);
        customize(&mut config);
        let state = AppState::from_config(config).expect("app state");
        Self { server, app: app(state) }
    }

    /// Answer the site-status endpoint with the given flag.
    pub async fn maintenance(&self, on: bool) {
        Mock::given(method("GET"))
            .and(path("/api/header"))
            .and(query_param("populate", "status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "status": { "maintenance_mode": on } } })),
            )
            .mount(&self.server)
            .await;
    }

    /// Make the site-status endpoint fail.
    pub async fn status_fails(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/api/header"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).expect("request")).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.expect("infallible")
    }

    /// Number of requests the upstream saw on `path`.
    pub async fn upstream_hits(&self, path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == path)
            .count()
    }

    pub async fn status_hits(&self) -> usize {
        self.upstream_hits("/api/header").await
    }
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Config pointing every upstream at `server`.
pub fn upstream_config(server: &MockServer) -> Config {
    Config {
        upstream: UpstreamConfig {
            status_base_url: format!("{}/api", server.uri()),
            documents_base_url: format!("{}/uploads", server.uri()),
            analytics_base_url: format!("{}/v1", server.uri()),
            timeout_ms: 1000,
        },
        ..Config::default()
    }
}
