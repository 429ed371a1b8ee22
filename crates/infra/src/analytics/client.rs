//! HTTP adapter for the analytics backend
//!
//! Wire format:
//! - `POST {base}/visits` with `{ "started_at" }`, answered by `{ "id" }` or
//!   `{ "data": { "id" } }` (string or numeric id)
//! - `PATCH {base}/visits/{id}` with `{ "time_on_page_ms" }`
//! - `POST {base}/activities` with `{ "visit_id", "events" }`
//!
//! Calls are single-attempt: the reporter treats telemetry as fire-and-forget
//! and a retried visit record could double-count.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;
use veriprint_core::AnalyticsBackend;
use veriprint_domain::{
    ActivityBatchRequest, ActivityEvent, RecordVisitRequest, Result, UpdateVisitRequest,
    UpstreamConfig, VeriprintError, VisitId,
};

use crate::http::HttpClient;

/// Analytics backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpAnalyticsBackend {
    http: HttpClient,
    base_url: Url,
}

impl HttpAnalyticsBackend {
    /// # Errors
    ///
    /// Returns [`VeriprintError::Config`] if `base_url` is not an absolute
    /// URL that can carry path segments.
    pub fn new(http: HttpClient, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| VeriprintError::Config(format!("invalid analytics URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(VeriprintError::Config(format!(
                "analytics URL cannot be a base: {base_url}"
            )));
        }
        Ok(Self { http, base_url })
    }

    /// Build the adapter from upstream config with a single-attempt client.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout()).max_attempts(1).build()?;
        Self::new(http, &config.analytics_base_url)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl AnalyticsBackend for HttpAnalyticsBackend {
    #[instrument(skip(self))]
    async fn record_visit(&self, started_at: DateTime<Utc>) -> Result<VisitId> {
        let request = self
            .http
            .request(Method::POST, self.endpoint(&["visits"]))
            .json(&RecordVisitRequest { started_at });

        let body: RecordVisitResponse = self.http.send_json(request).await?;
        let visit_id = body.into_visit_id()?;
        debug!(visit_id = %visit_id, "visit recorded");
        Ok(visit_id)
    }

    #[instrument(skip(self), fields(visit_id = %visit_id))]
    async fn update_visit(&self, visit_id: &VisitId, time_on_page_ms: u64) -> Result<()> {
        let request = self
            .http
            .request(Method::PATCH, self.endpoint(&["visits", visit_id.as_str()]))
            .json(&UpdateVisitRequest { time_on_page_ms });

        self.http.send_checked(request).await?;
        Ok(())
    }

    #[instrument(skip(self, events), fields(events = events.len()))]
    async fn report_activity(
        &self,
        visit_id: Option<&VisitId>,
        events: &[ActivityEvent],
    ) -> Result<()> {
        let request = self
            .http
            .request(Method::POST, self.endpoint(&["activities"]))
            .json(&ActivityBatchRequest { visit_id, events });

        self.http.send_checked(request).await?;
        Ok(())
    }
}

/// Accepts both the flat and the `data`-wrapped response shapes.
#[derive(Debug, Deserialize)]
struct RecordVisitResponse {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    data: Option<RecordVisitData>,
}

#[derive(Debug, Deserialize)]
struct RecordVisitData {
    #[serde(default)]
    id: Option<Value>,
}

impl RecordVisitResponse {
    fn into_visit_id(self) -> Result<VisitId> {
        let raw = self.id.or_else(|| self.data.and_then(|d| d.id));
        match raw {
            Some(Value::String(s)) if !s.is_empty() => Ok(VisitId::new(s)),
            Some(Value::Number(n)) => Ok(VisitId::new(n.to_string())),
            other => Err(VeriprintError::MalformedResponse(format!(
                "visit response carries no usable id: {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;
    use veriprint_domain::{ActivityKind, TargetDescriptor};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn backend(server: &MockServer) -> HttpAnalyticsBackend {
        let http = HttpClient::builder().max_attempts(1).build().expect("http client");
        HttpAnalyticsBackend::new(http, &format!("{}/v1/", server.uri())).expect("backend")
    }

    fn started() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn record_visit_posts_start_time_and_reads_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/visits"))
            .and(body_json(json!({ "started_at": "2024-05-01T09:30:00Z" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "v-42" })))
            .expect(1)
            .mount(&server)
            .await;

        let id = backend(&server).record_visit(started()).await.expect("visit id");
        assert_eq!(id.as_str(), "v-42");
    }

    #[tokio::test]
    async fn record_visit_accepts_wrapped_numeric_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/visits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": 77 } })))
            .mount(&server)
            .await;

        let id = backend(&server).record_visit(started()).await.expect("visit id");
        assert_eq!(id.as_str(), "77");
    }

    #[tokio::test]
    async fn record_visit_without_id_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&server)
            .await;

        let result = backend(&server).record_visit(started()).await;
        assert!(matches!(result, Err(VeriprintError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn update_visit_patches_elapsed_time() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/visits/v-42"))
            .and(body_json(json!({ "time_on_page_ms": 12_500 })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        backend(&server).update_visit(&VisitId::new("v-42"), 12_500).await.expect("update");
    }

    #[tokio::test]
    async fn report_activity_sends_events_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/activities"))
            .and(body_json(json!({
                "visit_id": "v-42",
                "events": [
                    { "kind": "click", "target": "button#cta", "occurred_at": "2024-05-01T09:30:00Z" },
                    { "kind": "scroll", "target": "document", "occurred_at": "2024-05-01T09:30:00Z" }
                ]
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let events = vec![
            ActivityEvent {
                kind: ActivityKind::Click,
                target: TargetDescriptor::new("button#cta"),
                occurred_at: started(),
            },
            ActivityEvent {
                kind: ActivityKind::Scroll,
                target: TargetDescriptor::document(),
                occurred_at: started(),
            },
        ];

        backend(&server)
            .report_activity(Some(&VisitId::new("v-42")), &events)
            .await
            .expect("report");
    }

    #[tokio::test]
    async fn server_error_surfaces_as_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let result = backend(&server).report_activity(None, &[]).await;
        assert!(matches!(result, Err(VeriprintError::Upstream { status: 500, .. })));
    }

    #[test]
    fn rejects_unusable_base_url() {
        let http = HttpClient::builder().build().expect("http client");
        assert!(HttpAnalyticsBackend::new(http.clone(), "analytics").is_err());
        assert!(HttpAnalyticsBackend::new(http, "mailto:ops@veriprint.example").is_err());
    }
}
