use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use veriprint_domain::VeriprintError;

use crate::errors::InfraError;

const USER_AGENT: &str = concat!("veriprint-web/", env!("CARGO_PKG_VERSION"));

/// HTTP client with built-in retry and timeout support.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder with retry semantics.
    ///
    /// Server errors and transport failures are retried up to the configured
    /// attempt count; the final response is returned whatever its status.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, VeriprintError> {
        let attempts = self.max_attempts.max(1);

        for attempt in 0..attempts {
            let cloned_builder = builder.try_clone().ok_or_else(|| {
                VeriprintError::Internal(
                    "request body cannot be cloned; buffer the body to enable retries".into(),
                )
            })?;

            let request = cloned_builder.build().map_err(|err| {
                let infra: InfraError = err.into();
                VeriprintError::from(infra)
            })?;

            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt = attempt + 1, %method, %url, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %method, %url, %status, "received HTTP response");

                    if status.is_server_error() && attempt + 1 < attempts {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, %method, %url, error = %err, "HTTP request failed");

                    if attempt + 1 < attempts && should_retry_error(&err) {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    let infra: InfraError = err.into();
                    return Err(VeriprintError::from(infra));
                }
            }
        }

        Err(VeriprintError::Internal(
            "http client exhausted retries without producing a result".into(),
        ))
    }

    /// Send and require a 2xx status.
    ///
    /// `404` maps to [`VeriprintError::NotFound`], every other non-success
    /// status to [`VeriprintError::Upstream`].
    pub async fn send_checked(&self, builder: RequestBuilder) -> Result<Response, VeriprintError> {
        let response = self.send(builder).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(status, url.as_str(), &body))
    }

    /// Send, require a 2xx status and decode the JSON body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, VeriprintError> {
        let response = self.send_checked(builder).await?;
        let bytes = response.bytes().await.map_err(|err| {
            let infra: InfraError = err.into();
            VeriprintError::from(infra)
        })?;
        serde_json::from_slice(&bytes).map_err(|err| {
            let infra: InfraError = err.into();
            VeriprintError::from(infra)
        })
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = u32::try_from(retry_number.saturating_sub(1).min(8)).unwrap_or(8);
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn build(self) -> Result<HttpClient, VeriprintError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .no_proxy()
            .build().map_err(|err| {
            let infra: InfraError = err.into();
            VeriprintError::from(infra)
        })?;

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_request() || err.is_connect()
}

fn map_status_error(status: StatusCode, url: &str, body: &str) -> VeriprintError {
    let message = if body.is_empty() {
        format!("{url} returned status {status}")
    } else {
        let snippet: String = body.chars().take(200).collect();
        format!("{url} returned status {status}: {snippet}")
    };

    if status == StatusCode::NOT_FOUND {
        VeriprintError::NotFound(message)
    } else {
        VeriprintError::Upstream { status: status.as_u16(), message }
    }
}
