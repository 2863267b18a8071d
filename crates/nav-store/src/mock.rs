//! In-memory tree store for testing.
//!
//! Provides [`MemoryStore`] for unit testing without a real backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::mapper::normalize_url;
use crate::store::{ItemKind, NodeHandle, StoreError, StoreErrorKind, TreeStore};

/// Backend identifier for error messages.
const BACKEND: &str = "Memory";

#[derive(Debug, Default)]
struct Entry {
    kind: Option<ItemKind>,
    properties: HashMap<String, String>,
    children: Vec<String>,
}

/// In-memory tree store.
///
/// Nodes are added with the builder methods. Missing intermediate nodes are
/// created implicitly (without properties). Children are enumerated in
/// insertion order.
///
/// # Example
///
/// ```ignore
/// use nav_store::{MemoryStore, TreeStore};
///
/// let store = MemoryStore::new()
///     .with_node("/", [("label", "Home")])
///     .with_node("/test", [("label", "Test")]);
///
/// let root = store.node("/").unwrap().unwrap();
/// assert_eq!(store.children(&root).unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    entries: HashMap<String, Entry>,
    children_reads: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "/".to_owned(),
            Entry {
                kind: Some(ItemKind::Node),
                ..Entry::default()
            },
        );
        Self {
            entries,
            children_reads: AtomicUsize::new(0),
        }
    }
}

impl MemoryStore {
    /// Create a store containing only the repository root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node (or set properties on an existing one).
    #[must_use]
    pub fn with_node<I, K, V>(mut self, id: &str, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let id = self.insert(id, ItemKind::Node);
        let entry = self.entries.entry(id).or_default();
        entry
            .properties
            .extend(properties.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a non-node item that is enumerated as a child of its parent.
    #[must_use]
    pub fn with_property_item(mut self, id: &str) -> Self {
        self.insert(id, ItemKind::Property);
        self
    }

    /// Number of `children()` calls served so far.
    #[must_use]
    pub fn children_reads(&self) -> usize {
        self.children_reads.load(Ordering::Relaxed)
    }

    fn insert(&mut self, id: &str, kind: ItemKind) -> String {
        let id = normalize_url(id);
        let exists = self
            .entries
            .get(&id)
            .is_some_and(|entry| entry.kind.is_some());
        if !exists {
            let handle = NodeHandle::new(id.as_str());
            if let Some(parent) = handle.depth().checked_sub(1).and_then(|d| handle.ancestor_id(d)) {
                let parent = self.insert(&parent, ItemKind::Node);
                self.entries
                    .entry(parent)
                    .or_default()
                    .children
                    .push(id.clone());
            }
        }
        self.entries.entry(id.clone()).or_default().kind.get_or_insert(kind);
        id
    }

    fn handle(&self, id: &str) -> Option<NodeHandle> {
        let kind = self.entries.get(id)?.kind?;
        Some(NodeHandle::with_kind(id, kind))
    }
}

impl TreeStore for MemoryStore {
    fn node(&self, id: &str) -> Result<Option<NodeHandle>, StoreError> {
        Ok(self.handle(&normalize_url(id)))
    }

    fn children(&self, node: &NodeHandle) -> Result<Vec<NodeHandle>, StoreError> {
        self.children_reads.fetch_add(1, Ordering::Relaxed);
        let entry = self
            .entries
            .get(node.id())
            .ok_or_else(|| StoreError::not_found(node.id()).with_backend(BACKEND))?;
        Ok(entry
            .children
            .iter()
            .filter_map(|id| self.handle(id))
            .collect())
    }

    fn ancestor(&self, node: &NodeHandle, depth: usize) -> Result<NodeHandle, StoreError> {
        let id = node.ancestor_id(depth).ok_or_else(|| {
            StoreError::new(StoreErrorKind::InvalidPath)
                .with_id(node.id())
                .with_backend(BACKEND)
        })?;
        self.handle(&id)
            .ok_or_else(|| StoreError::not_found(id).with_backend(BACKEND))
    }

    fn property(&self, node: &NodeHandle, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .entries
            .get(node.id())
            .and_then(|entry| entry.properties.get(name))
            .cloned())
    }
}
