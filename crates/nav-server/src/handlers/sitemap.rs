//! Sitemap API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::error::ServerError;
use crate::handlers::menu::MenuResponse;
use crate::handlers::run_walk;
use crate::state::AppState;

/// Handle GET /api/sitemap.
pub(crate) async fn get_sitemap(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MenuResponse>, ServerError> {
    let menu = run_walk(&state, "/", |walker, cancel| walker.sitemap_with_cancel(cancel)).await?;
    Ok(Json(menu.into()))
}
