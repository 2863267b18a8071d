//! Tree store abstraction for content navigation.
//!
//! This crate defines the two collaborators the navigation engine reads
//! through:
//!
//! - [`TreeStore`]: read-only access to a hierarchy of addressable nodes
//!   (lookup by storage id, ordered children, ancestor by depth, string
//!   properties)
//! - [`PathMapper`]: translation between public URLs and storage ids
//!
//! It also provides [`PrefixMapper`], the mapper used when a navigation tree
//! lives below a fixed storage path, and [`MemoryStore`] for testing (behind
//! the `mock` feature flag).
//!
//! # Example
//!
//! ```ignore
//! use nav_store::{MemoryStore, PathMapper, PrefixMapper, TreeStore};
//!
//! let store = MemoryStore::new().with_node("/cms/main/about", [("label", "About")]);
//! let mapper = PrefixMapper::new("/cms/main");
//!
//! let node = store.node(&mapper.storage_id("/about"))?.unwrap();
//! assert_eq!(store.property(&node, "label")?, Some("About".to_owned()));
//! ```

mod mapper;
#[cfg(feature = "mock")]
mod mock;
mod store;

pub use mapper::{PathMapper, PrefixMapper, is_within, normalize_url};
#[cfg(feature = "mock")]
pub use mock::MemoryStore;
pub use store::{ItemKind, NodeHandle, StoreError, StoreErrorKind, TreeStore};
