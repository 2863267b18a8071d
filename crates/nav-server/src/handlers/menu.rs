//! Menu API endpoint.
//!
//! Returns the menu tree opened at a url. The expansion budget comes from
//! the `depth` query parameter (`-1` for unlimited) and falls back to the
//! configured default.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use nav_core::{Depth, Menu, MenuOptions, MenuRecord};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::handlers::{check_url, run_walk};
use crate::state::AppState;

/// Query parameters for GET /api/menu.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MenuQuery {
    /// Expansion budget, `-1` for unlimited.
    depth: Option<i64>,
    /// Return the root entry with its children attached.
    include_root: Option<bool>,
}

/// Menu body: `{"items": [...]}` or `{"root": {...}}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum MenuResponse {
    /// Entries below the navigation root.
    Items(Vec<MenuRecord>),
    /// Navigation root with its children.
    Root(MenuRecord),
}

impl From<Menu> for MenuResponse {
    fn from(menu: Menu) -> Self {
        match menu {
            Menu::Items(items) => Self::Items(items),
            Menu::Root(root) => Self::Root(root),
        }
    }
}

/// Handle GET /api/menu.
pub(crate) async fn get_root_menu(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MenuQuery>, QueryRejection>,
) -> Result<Json<MenuResponse>, ServerError> {
    menu(&state, "/", query).await
}

/// Handle GET /api/menu/{*url}.
pub(crate) async fn get_menu(
    State(state): State<Arc<AppState>>,
    Path(url): Path<String>,
    query: Result<Query<MenuQuery>, QueryRejection>,
) -> Result<Json<MenuResponse>, ServerError> {
    menu(&state, &url, query).await
}

async fn menu(
    state: &AppState,
    raw_url: &str,
    query: Result<Query<MenuQuery>, QueryRejection>,
) -> Result<Json<MenuResponse>, ServerError> {
    let url = check_url(raw_url)?;
    let Query(query) = query.map_err(|rejection| ServerError::InvalidQuery {
        url: url.clone(),
        message: rejection.body_text(),
    })?;
    let options = menu_options(state, &query).map_err(|e| ServerError::nav(e, &url))?;

    let target = url.clone();
    let menu = run_walk(state, &url, move |walker, cancel| {
        walker.menu_with_cancel(&target, options, cancel)
    })
    .await?;
    Ok(Json(menu.into()))
}

/// Merge query parameters with the configured defaults.
fn menu_options(state: &AppState, query: &MenuQuery) -> Result<MenuOptions, nav_core::NavError> {
    let depth = match query.depth {
        Some(depth) => Depth::try_from(depth)?,
        None => state.default_depth,
    };
    Ok(MenuOptions {
        depth,
        include_root: query.include_root.unwrap_or(state.include_root),
    })
}
