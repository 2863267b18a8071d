//! HTTP request handlers.

pub(crate) mod breadcrumb;
pub(crate) mod children;
pub(crate) mod menu;
pub(crate) mod sitemap;

use std::sync::Arc;

use nav_core::{CancelToken, HierarchyWalker, NavError};
use nav_store::normalize_url;
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response carrying a flat or nested list of entries.
#[derive(Serialize)]
pub(crate) struct ItemsResponse<T: Serialize> {
    /// Entries in store order.
    pub(crate) items: T,
}

/// Normalize a url captured from the route and reject `..` segments.
pub(crate) fn check_url(raw: &str) -> Result<String, ServerError> {
    let url = normalize_url(raw);
    if url.split('/').any(|segment| segment == "..") {
        return Err(ServerError::InvalidUrl(url));
    }
    Ok(url)
}

/// Run a traversal on the blocking pool under the request deadline.
///
/// On expiry the traversal's cancel token is set so the walker stops at its
/// next check.
pub(crate) async fn run_walk<T, F>(state: &AppState, url: &str, walk: F) -> Result<T, ServerError>
where
    T: Send + 'static,
    F: FnOnce(&HierarchyWalker, &CancelToken) -> Result<T, NavError> + Send + 'static,
{
    let walker = Arc::clone(&state.walker);
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();
    let task = tokio::task::spawn_blocking(move || walk(walker.as_ref(), &worker_cancel));

    match tokio::time::timeout(state.timeout, task).await {
        Ok(joined) => joined?.map_err(|e| ServerError::nav(e, url)),
        Err(_) => {
            cancel.cancel();
            tracing::warn!(url = %url, timeout_ms = state.timeout.as_millis(), "Navigation deadline exceeded");
            Err(ServerError::Timeout {
                url: url.to_owned(),
                timeout_ms: state.timeout.as_millis(),
            })
        }
    }
}
