//! HTTP adapter for the CMS site-status endpoint

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, instrument};
use url::Url;
use veriprint_core::SiteStatusSource;
use veriprint_domain::constants::SITE_HEADER_PATH;
use veriprint_domain::{Result, SiteHeaderResponse, UpstreamConfig, VeriprintError};

use crate::http::HttpClient;

/// Reads `data.status.maintenance_mode` from `GET {base}/header?populate=status`.
///
/// Every call goes to the network; the gate relies on seeing a fresh flag.
#[derive(Debug, Clone)]
pub struct HttpSiteStatusSource {
    http: HttpClient,
    endpoint: Url,
}

impl HttpSiteStatusSource {
    /// # Errors
    ///
    /// Returns [`VeriprintError::Config`] if the base URL does not form a
    /// valid endpoint URL.
    pub fn new(http: HttpClient, status_base_url: &str) -> Result<Self> {
        let raw = format!("{}{}", status_base_url.trim_end_matches('/'), SITE_HEADER_PATH);
        let endpoint = Url::parse(&raw)
            .map_err(|e| VeriprintError::Config(format!("invalid site status URL {raw:?}: {e}")))?;
        Ok(Self { http, endpoint })
    }

    /// Single-attempt client bounded by the upstream timeout, so a slow CMS
    /// delays a page by at most one timeout before the gate fails open.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout()).max_attempts(1).build()?;
        Self::new(http, &config.status_base_url)
    }
}

#[async_trait]
impl SiteStatusSource for HttpSiteStatusSource {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn maintenance_mode(&self) -> Result<bool> {
        let request = self.http.request(Method::GET, self.endpoint.clone());
        let body: SiteHeaderResponse = self.http.send_json(request).await?;
        let flag = body.maintenance_mode()?;
        debug!(maintenance_mode = flag, "site status fetched");
        Ok(flag)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn source(server: &MockServer) -> HttpSiteStatusSource {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(500))
            .max_attempts(1)
            .build()
            .expect("http client");
        HttpSiteStatusSource::new(http, &format!("{}/api/", server.uri())).expect("source")
    }

    async fn respond(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/api/header"))
            .and(query_param("populate", "status"))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[test]
    fn endpoint_joins_base_and_header_path() {
        let http = HttpClient::builder().build().expect("http client");
        let source = HttpSiteStatusSource::new(http, "https://cms.test/api/").unwrap();
        assert_eq!(source.endpoint.as_str(), "https://cms.test/api/header?populate=status");
    }

    #[tokio::test]
    async fn reads_maintenance_flag() {
        let server = MockServer::start().await;
        respond(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "status": { "maintenance_mode": true } } })),
        )
        .await;

        assert!(source(&server).maintenance_mode().await.expect("flag"));
    }

    #[tokio::test]
    async fn false_flag_is_returned() {
        let server = MockServer::start().await;
        respond(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "status": { "maintenance_mode": false } } })),
        )
        .await;

        assert!(!source(&server).maintenance_mode().await.expect("flag"));
    }

    #[tokio::test]
    async fn missing_flag_is_malformed() {
        let server = MockServer::start().await;
        respond(&server, ResponseTemplate::new(200).set_body_json(json!({ "data": {} }))).await;

        let result = source(&server).maintenance_mode().await;
        assert!(matches!(result, Err(VeriprintError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let server = MockServer::start().await;
        respond(&server, ResponseTemplate::new(503)).await;

        let result = source(&server).maintenance_mode().await;
        assert!(matches!(result, Err(VeriprintError::Upstream { status: 503, .. })));
    }

    #[tokio::test]
    async fn slow_upstream_times_out_as_network_error() {
        let server = MockServer::start().await;
        respond(
            &server,
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({ "data": { "status": { "maintenance_mode": true } } })),
        )
        .await;

        let result = source(&server).maintenance_mode().await;
        assert!(matches!(result, Err(VeriprintError::Network(_))));
    }
}
