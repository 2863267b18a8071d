//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;
use std::time::Duration;

use nav_core::{Depth, HierarchyWalker};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Walker serving every navigation request.
    pub(crate) walker: Arc<HierarchyWalker>,
    /// Deadline for a single traversal.
    pub(crate) timeout: Duration,
    /// Menu depth used when the query omits `depth`.
    pub(crate) default_depth: Depth,
    /// Whether menus include the root when the query omits `include_root`.
    pub(crate) include_root: bool,
}
