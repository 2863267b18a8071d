//! Navigation error type.

use nav_store::StoreError;

/// Error returned by navigation operations.
///
/// None of these are recovered from inside the walker: an operation either
/// returns a complete result or fails as a whole.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// The requested URL has no node in the store.
    #[error("No navigation node found for url {url}")]
    NodeNotFound {
        /// Requested URL.
        url: String,
    },

    /// The navigation root is absent from the store.
    #[error("Did not find any navigation root at {storage_id}")]
    RootNotFound {
        /// Storage id URL `/` maps to.
        storage_id: String,
    },

    /// A visitor was handed an item that is not a traversable node.
    #[error("Did not expect to visit a non-node item: {id}")]
    UnexpectedNodeKind {
        /// Storage id of the offending item.
        id: String,
    },

    /// Walking from the navigation root down to a node did not reach it.
    #[error(
        "Could not resolve ancestors of {url} between depth {root_depth} and {node_depth}"
    )]
    AncestorResolution {
        /// Requested URL.
        url: String,
        /// Store depth of the navigation root.
        root_depth: usize,
        /// Store depth of the requested node.
        node_depth: usize,
    },

    /// An internal consistency check failed.
    #[error("Internal error: {0}")]
    InternalInvariant(String),

    /// Depth budget outside the accepted range.
    #[error("Invalid depth {0}: expected -1 (unlimited) or a non-negative number")]
    InvalidDepth(i64),

    /// The traversal was aborted through its cancel token.
    #[error("Traversal cancelled")]
    Cancelled,

    /// Tree store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
