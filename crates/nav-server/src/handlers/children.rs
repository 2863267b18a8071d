//! Child list API endpoint.
//!
//! Returns the direct children of a navigation node as `url`/`title` pairs.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use nav_core::{AttributeRecord, RecordMap};

use crate::error::ServerError;
use crate::handlers::{ItemsResponse, check_url, run_walk};
use crate::state::AppState;

type ChildrenResponse = ItemsResponse<RecordMap<AttributeRecord>>;

/// Handle GET /api/children.
pub(crate) async fn get_root_children(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChildrenResponse>, ServerError> {
    children(&state, "/").await
}

/// Handle GET /api/children/{*url}.
pub(crate) async fn get_children(
    State(state): State<Arc<AppState>>,
    Path(url): Path<String>,
) -> Result<Json<ChildrenResponse>, ServerError> {
    children(&state, &url).await
}

async fn children(state: &AppState, raw_url: &str) -> Result<Json<ChildrenResponse>, ServerError> {
    let url = check_url(raw_url)?;
    let target = url.clone();
    let items = run_walk(state, &url, move |walker, cancel| {
        walker.child_list_with_cancel(&target, cancel)
    })
    .await?;
    Ok(Json(ItemsResponse { items }))
}
