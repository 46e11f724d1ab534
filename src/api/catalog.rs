//! Catalog home page

use axum::{extract::State, response::Html};

use crate::{error::AppResult, views, AppState};

use super::render;

/// Record counts for the whole catalog
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Catalog home page", body = String, content_type = "text/html")
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.services.catalog.counts().await?;
    Ok(render(views::catalog::index(&counts)))
}
