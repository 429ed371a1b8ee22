//! `GET /api/hero?file=<name>.html`
//!
//! Serves a CMS hero fragment with the site typography spliced in.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use veriprint_core::{hero_style_block, inject_style_block, HeroFileName};

use crate::context::AppState;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct HeroQuery {
    pub file: Option<String>,
}

pub async fn hero(
    State(state): State<AppState>,
    query: Result<Query<HeroQuery>, QueryRejection>,
) -> Result<Html<String>, ApiError> {
    let Query(query) =
        query.map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;
    let raw = query.file.as_deref().ok_or_else(|| ApiError::invalid_input("missing file"))?;
    let file = HeroFileName::parse(raw)?;

    let html = state.documents.fetch_hero(&file).await?;
    Ok(Html(inject_style_block(&html, &hero_style_block())))
}
