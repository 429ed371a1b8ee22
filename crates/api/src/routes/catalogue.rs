//! `GET /api/catalogue?path=<relative>&download=<bool>`
//!
//! Streams a catalogue PDF from the documents upstream under the site's own
//! origin.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use veriprint_core::CataloguePath;
use veriprint_domain::constants::DOCUMENT_CACHE_CONTROL;
use veriprint_domain::VeriprintError;

use crate::context::AppState;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct CatalogueQuery {
    pub path: Option<String>,
    pub download: Option<String>,
}

impl CatalogueQuery {
    fn wants_download(&self) -> bool {
        self.download
            .as_deref()
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
    }
}

pub async fn catalogue(
    State(state): State<AppState>,
    query: Result<Query<CatalogueQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) =
        query.map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;
    let raw = query.path.as_deref().ok_or_else(|| ApiError::invalid_input("missing path"))?;
    let path = CataloguePath::parse(raw)?;

    let pdf = state.documents.fetch_catalogue(&path).await?;

    let disposition = if query.wants_download() { "attachment" } else { "inline" };
    let disposition =
        HeaderValue::from_str(&format!("{disposition}; filename=\"{}\"", path.file_name()))
            .map_err(|e| VeriprintError::Internal(format!("content-disposition: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, HeaderValue::from_static(DOCUMENT_CACHE_CONTROL)),
        ],
        pdf,
    )
        .into_response())
}
