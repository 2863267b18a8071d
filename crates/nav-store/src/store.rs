//! Tree store trait, node handles and error types.
//!
//! Provides the core [`TreeStore`] trait for read-only access to a content
//! hierarchy, along with [`StoreError`] for unified error handling across
//! backends.
//!
//! # Storage Id Convention
//!
//! Storage ids are absolute, slash-separated paths into the backing tree:
//! - `"/"` - repository root (depth 0)
//! - `"/cms"` - depth 1
//! - `"/cms/navigation/main"` - depth 3
//!
//! Backends map ids to their internal format.

use std::fmt;
use std::sync::Arc;

/// Kind of item a store hands out.
///
/// Content-repository APIs expose both nodes and properties as items. Only
/// nodes can be traversed; a property reaching a visitor means the store
/// enumerated something it should not have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Traversable content node.
    Node,
    /// Property item (not traversable).
    Property,
}

/// Opaque reference to one position in the backing tree.
///
/// Handles are obtained from a [`TreeStore`] and are only meaningful to the
/// store that produced them. Cloning is cheap.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    id: Arc<str>,
    depth: usize,
    kind: ItemKind,
}

impl NodeHandle {
    /// Create a node handle for a storage id.
    ///
    /// The depth is derived from the number of id segments.
    #[must_use]
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self::with_kind(id, ItemKind::Node)
    }

    /// Create a handle of the given item kind.
    #[must_use]
    pub fn with_kind(id: impl Into<Arc<str>>, kind: ItemKind) -> Self {
        let id = id.into();
        let depth = id.split('/').filter(|s| !s.is_empty()).count();
        Self { id, depth, kind }
    }

    /// Storage id of this item.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Depth below the repository root (root is 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Item kind.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Whether this item is a traversable node.
    #[must_use]
    pub fn is_node(&self) -> bool {
        self.kind == ItemKind::Node
    }

    /// Last segment of the storage id (empty for the repository root).
    #[must_use]
    pub fn name(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or_default()
    }

    /// Storage id of the ancestor at `depth`, if `depth` is not below this item.
    #[must_use]
    pub fn ancestor_id(&self, depth: usize) -> Option<String> {
        if depth > self.depth {
            return None;
        }
        let segments: Vec<&str> = self
            .id
            .split('/')
            .filter(|s| !s.is_empty())
            .take(depth)
            .collect();
        Some(format!("/{}", segments.join("/")))
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ItemKind::Node => write!(f, "Node({})", self.id),
            ItemKind::Property => write!(f, "Property({})", self.id),
        }
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// Item does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid storage id or depth.
    InvalidPath,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Operation timed out.
    Timeout,
    /// Other/unknown error category.
    Other,
}

/// Store error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StoreError {
    /// Semantic error category.
    pub kind: StoreErrorKind,
    /// Storage id context (if applicable).
    pub id: Option<String>,
    /// Backend identifier (e.g., "Fs", "Memory").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new store error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            id: None,
            backend: None,
            source: None,
        }
    }

    /// Attach storage id context.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error for a storage id.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::NotFound).with_id(id)
    }

    /// Create a store error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, id: Option<String>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StoreErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StoreErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut => StoreErrorKind::Timeout,
            _ => StoreErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(id) = id {
            error = error.with_id(id);
        }
        error
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "[Backend] Kind: message (id: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StoreErrorKind::NotFound => "Not found",
            StoreErrorKind::PermissionDenied => "Permission denied",
            StoreErrorKind::InvalidPath => "Invalid path",
            StoreErrorKind::Unavailable => "Unavailable",
            StoreErrorKind::Timeout => "Timeout",
            StoreErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(id) = &self.id {
            write!(f, " (id: {id})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read-only access to a content hierarchy.
///
/// Implementations own their consistency and concurrency control. Callers
/// issue one read per operation and never retry; backends that want retries
/// perform them internally.
pub trait TreeStore: Send + Sync {
    /// Fetch the item stored at `id`.
    ///
    /// Returns `Ok(None)` if nothing exists there.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails to answer.
    fn node(&self, id: &str) -> Result<Option<NodeHandle>, StoreError>;

    /// Enumerate the direct children of a node.
    ///
    /// The order is stable across calls as long as the tree is not modified.
    fn children(&self, node: &NodeHandle) -> Result<Vec<NodeHandle>, StoreError>;

    /// Ancestor of `node` at the given absolute depth.
    ///
    /// `depth == node.depth()` yields the node itself.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::InvalidPath`] if `depth` is below the node.
    fn ancestor(&self, node: &NodeHandle, depth: usize) -> Result<NodeHandle, StoreError>;

    /// Read a string property.
    ///
    /// Returns `Ok(None)` if the property is missing.
    fn property(&self, node: &NodeHandle, name: &str) -> Result<Option<String>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_handle_depth() {
        assert_eq!(NodeHandle::new("/").depth(), 0);
        assert_eq!(NodeHandle::new("/cms").depth(), 1);
        assert_eq!(NodeHandle::new("/cms/navigation/main").depth(), 3);
    }

    #[test]
    fn test_node_handle_name() {
        assert_eq!(NodeHandle::new("/").name(), "");
        assert_eq!(NodeHandle::new("/cms/navigation").name(), "navigation");
    }

    #[test]
    fn test_node_handle_ancestor_id() {
        let node = NodeHandle::new("/cms/navigation/main/test");

        assert_eq!(node.ancestor_id(0), Some("/".to_owned()));
        assert_eq!(node.ancestor_id(2), Some("/cms/navigation".to_owned()));
        assert_eq!(
            node.ancestor_id(4),
            Some("/cms/navigation/main/test".to_owned())
        );
        assert_eq!(node.ancestor_id(5), None);
    }

    #[test]
    fn test_node_handle_equality_includes_kind() {
        let node = NodeHandle::new("/a");
        let property = NodeHandle::with_kind("/a", ItemKind::Property);

        assert_ne!(node, property);
        assert!(node.is_node());
        assert!(!property.is_node());
    }

    #[test]
    fn test_node_handle_debug() {
        assert_eq!(format!("{:?}", NodeHandle::new("/a")), "Node(/a)");
        assert_eq!(
            format!("{:?}", NodeHandle::with_kind("/a/p", ItemKind::Property)),
            "Property(/a/p)"
        );
    }

    #[test]
    fn test_store_error_new() {
        let err = StoreError::new(StoreErrorKind::NotFound);

        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert!(err.id.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_store_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = StoreError::new(StoreErrorKind::NotFound).with_source(io_err);

        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_store_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::io(io_err, Some("/a".to_owned()));

        assert_eq!(err.kind, StoreErrorKind::PermissionDenied);
        assert_eq!(err.id.as_deref(), Some("/a"));
    }

    #[test]
    fn test_store_error_display_simple() {
        let err = StoreError::not_found("/foo/bar");

        assert_eq!(err.to_string(), "Not found (id: /foo/bar)");
    }

    #[test]
    fn test_store_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        let err = StoreError::new(StoreErrorKind::NotFound)
            .with_backend("Fs")
            .with_id("/foo")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: no such directory (id: /foo)"
        );
    }

    static_assertions::assert_impl_all!(StoreError: Send, Sync);
    static_assertions::assert_impl_all!(NodeHandle: Send, Sync);
}
