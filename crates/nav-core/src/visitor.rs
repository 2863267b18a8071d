//! Node visitor abstraction.
//!
//! A visitor is called once per node the walker decides to visit and
//! accumulates one record per node. Visitors never traverse on their own:
//! the [`HierarchyWalker`](crate::HierarchyWalker) controls which nodes are
//! visited and in which order.

use nav_store::{NodeHandle, PathMapper, TreeStore};

use crate::error::NavError;
use crate::records::{Keyed, RecordMap};

/// Callback invoked for each visited node.
pub trait NodeVisitor {
    /// Record type accumulated per node.
    type Record: Keyed;

    /// Consume one node.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::UnexpectedNodeKind`] if `node` is not a traversable
    /// node, or a store error if reading its properties fails.
    fn visit(&mut self, node: &NodeHandle) -> Result<(), NavError>;

    /// Clear accumulated records so the visitor can be reused.
    fn reset(&mut self);

    /// Records accumulated so far, in visiting order.
    fn result(&self) -> &RecordMap<Self::Record>;

    /// Consume the visitor, returning its records.
    fn into_result(self) -> RecordMap<Self::Record>
    where
        Self: Sized;
}

/// Reads the url and title shared by all navigation records.
#[derive(Clone, Copy)]
pub(crate) struct EntryReader<'a> {
    store: &'a dyn TreeStore,
    mapper: &'a dyn PathMapper,
    title_property: &'a str,
}

impl<'a> EntryReader<'a> {
    pub(crate) fn new(
        store: &'a dyn TreeStore,
        mapper: &'a dyn PathMapper,
        title_property: &'a str,
    ) -> Self {
        Self {
            store,
            mapper,
            title_property,
        }
    }

    /// Public url and title of `node`.
    ///
    /// A missing title property falls back to the node name.
    pub(crate) fn read(&self, node: &NodeHandle) -> Result<(String, String), NavError> {
        if !node.is_node() {
            return Err(NavError::UnexpectedNodeKind {
                id: node.id().to_owned(),
            });
        }

        let url = self.mapper.url(node.id());
        let title = match self.store.property(node, self.title_property)? {
            Some(title) => title,
            None => {
                tracing::debug!(
                    id = %node,
                    property = self.title_property,
                    "Title property missing, using node name"
                );
                node.name().to_owned()
            }
        };

        Ok((url, title))
    }
}
