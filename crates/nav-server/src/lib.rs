//! HTTP server for content navigation.
//!
//! This crate serves the navigation structures built by
//! [`nav_core::HierarchyWalker`] as JSON over axum:
//!
//! | Route                                 | Body                          |
//! |---------------------------------------|-------------------------------|
//! | `GET /api/children[/{url}]`           | `{"items": [{url, title}]}`   |
//! | `GET /api/breadcrumb/{url}`           | `{"items": [{url, title}]}`   |
//! | `GET /api/menu[/{url}]?depth=&include_root=` | `{"items": [...]}` or `{"root": {...}}` |
//! | `GET /api/sitemap`                    | `{"root": {...}}`             |
//!
//! # Quick Start
//!
//! ```ignore
//! use nav_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         port: 8080,
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP──► axum router (nav-server)
//!                        │
//!                        └─► spawn_blocking + timeout
//!                                │
//!                                └─► HierarchyWalker ──► FsTreeStore
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use nav_core::{Depth, HierarchyWalker, NavError, WalkerConfig};
use nav_store::PrefixMapper;
use nav_store_fs::FsTreeStore;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content source directory.
    pub source_dir: PathBuf,
    /// Node property file name.
    pub meta_filename: String,
    /// Storage id that URL `/` maps to.
    pub root: String,
    /// Node property holding the display title.
    pub title_property: String,
    /// Default menu depth.
    pub depth: Depth,
    /// Whether menus include the root by default.
    pub include_root: bool,
    /// Expand sibling subtrees in parallel.
    pub parallel: bool,
    /// Deadline for a single traversal.
    pub timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            source_dir: PathBuf::from("content"),
            meta_filename: "meta.yaml".to_owned(),
            root: "/".to_owned(),
            title_property: "label".to_owned(),
            depth: Depth::default(),
            include_root: false,
            parallel: false,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Build a walker over the filesystem store described by `config`.
///
/// # Errors
///
/// Returns [`NavError::RootNotFound`] if the configured root does not exist.
pub fn build_walker(config: &ServerConfig) -> Result<HierarchyWalker, NavError> {
    let store = FsTreeStore::with_meta_filename(config.source_dir.clone(), &config.meta_filename);
    HierarchyWalker::new(
        Arc::new(store),
        Arc::new(PrefixMapper::new(&config.root)),
        WalkerConfig {
            title_property: config.title_property.clone(),
            parallel: config.parallel,
        },
    )
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the walker cannot be built or the server fails to
/// start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let walker = build_walker(&config)?;

    let state = Arc::new(AppState {
        walker: Arc::new(walker),
        timeout: config.timeout,
        default_depth: config.depth,
        include_root: config.include_root,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        source_dir = %config.source_dir.display(),
        root = %config.root,
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from navigation config.
///
/// # Errors
///
/// Returns [`NavError::InvalidDepth`] if the configured depth is out of range.
pub fn server_config_from_nav_config(config: &nav_config::Config) -> Result<ServerConfig, NavError> {
    Ok(ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.store_resolved.source_dir.clone(),
        meta_filename: config.store_resolved.meta_filename.clone(),
        root: config.navigation.root.clone(),
        title_property: config.navigation.title_property.clone(),
        depth: Depth::try_from(config.navigation.depth)?,
        include_root: config.navigation.include_root,
        parallel: config.navigation.parallel,
        timeout: Duration::from_millis(config.navigation.timeout_ms),
    })
}
