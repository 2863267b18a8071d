//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/children", get(handlers::children::get_root_children))
        .route("/api/children/{*url}", get(handlers::children::get_children))
        .route(
            "/api/breadcrumb/{*url}",
            get(handlers::breadcrumb::get_breadcrumb),
        )
        .route("/api/menu", get(handlers::menu::get_root_menu))
        .route("/api/menu/{*url}", get(handlers::menu::get_menu))
        .route("/api/sitemap", get(handlers::sitemap::get_sitemap))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
