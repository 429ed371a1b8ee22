//! Upstream client for catalogue PDFs and hero fragments
//!
//! Callers pass validated names from `veriprint_core::documents`; this client
//! only joins them onto the documents base URL and fetches the body.

use reqwest::Method;
use tracing::{debug, instrument};
use url::Url;
use veriprint_core::{CataloguePath, HeroFileName};
use veriprint_domain::{Result, UpstreamConfig, VeriprintError};

use crate::errors::InfraError;
use crate::http::HttpClient;

/// Fetches documents from `{documents_base_url}`.
#[derive(Debug, Clone)]
pub struct DocumentClient {
    http: HttpClient,
    base_url: Url,
}

impl DocumentClient {
    /// # Errors
    ///
    /// Returns [`VeriprintError::Config`] if `base_url` cannot carry path
    /// segments.
    pub fn new(http: HttpClient, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| VeriprintError::Config(format!("invalid documents URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(VeriprintError::Config(format!(
                "documents URL cannot be a base: {base_url}"
            )));
        }
        Ok(Self { http, base_url })
    }

    /// GETs are idempotent, so one retry is allowed on server errors.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout()).max_attempts(2).build()?;
        Self::new(http, &config.documents_base_url)
    }

    /// URL of a catalogue PDF.
    pub fn catalogue_url(&self, path: &CataloguePath) -> Url {
        self.join(path.as_str().split('/'))
    }

    /// URL of a hero fragment under `hero/`.
    pub fn hero_url(&self, file: &HeroFileName) -> Url {
        self.join(["hero", file.as_str()])
    }

    /// Fetch the raw bytes of a catalogue PDF.
    ///
    /// # Errors
    ///
    /// `NotFound` for an upstream 404, `Upstream` for other non-2xx statuses,
    /// `Network` for transport failures.
    #[instrument(skip(self), fields(path = %path.as_str()))]
    pub async fn fetch_catalogue(&self, path: &CataloguePath) -> Result<Vec<u8>> {
        let request = self.http.request(Method::GET, self.catalogue_url(path));
        let response = self.http.send_checked(request).await?;
        let bytes = response.bytes().await.map_err(|e| VeriprintError::from(InfraError::from(e)))?;
        debug!(bytes = bytes.len(), "catalogue fetched");
        Ok(bytes.to_vec())
    }

    /// Fetch a hero fragment as text.
    ///
    /// # Errors
    ///
    /// Same mapping as [`DocumentClient::fetch_catalogue`].
    #[instrument(skip(self), fields(file = %file.as_str()))]
    pub async fn fetch_hero(&self, file: &HeroFileName) -> Result<String> {
        let request = self.http.request(Method::GET, self.hero_url(file));
        let response = self.http.send_checked(request).await?;
        let html = response.text().await.map_err(|e| VeriprintError::from(InfraError::from(e)))?;
        debug!(bytes = html.len(), "hero fragment fetched");
        Ok(html)
    }

    fn join<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
