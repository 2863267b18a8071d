//! Breadcrumb API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use nav_core::{AttributeRecord, RecordMap};

use crate::error::ServerError;
use crate::handlers::{ItemsResponse, check_url, run_walk};
use crate::state::AppState;

/// Handle GET /api/breadcrumb/{*url}.
///
/// Items run from the navigation root down to the parent of `url`.
pub(crate) async fn get_breadcrumb(
    State(state): State<Arc<AppState>>,
    Path(url): Path<String>,
) -> Result<Json<ItemsResponse<RecordMap<AttributeRecord>>>, ServerError> {
    let url = check_url(&url)?;
    let target = url.clone();
    let items = run_walk(&state, &url, move |walker, cancel| {
        walker.ancestors_with_cancel(&target, cancel)
    })
    .await?;
    Ok(Json(ItemsResponse { items }))
}
