//! Navigation structures for hierarchical content.
//!
//! This crate provides:
//! - [`HierarchyWalker`]: child lists, breadcrumbs, menus and sitemaps built
//!   from a [`TreeStore`](nav_store::TreeStore)
//! - [`NodeVisitor`] with the [`AttributeCollector`] and
//!   [`MenuEntryCollector`] implementations
//! - [`Depth`] and [`Expansion`]: the menu expansion rules
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use nav_core::{HierarchyWalker, MenuOptions, WalkerConfig};
//! use nav_store::PrefixMapper;
//! use nav_store_fs::FsTreeStore;
//!
//! let store = Arc::new(FsTreeStore::new(PathBuf::from("content")));
//! let mapper = Arc::new(PrefixMapper::new("/"));
//! let walker = HierarchyWalker::new(store, mapper, WalkerConfig::default())?;
//!
//! let breadcrumb = walker.ancestors("/guide/install")?;
//! let menu = walker.menu("/guide/install", MenuOptions::default())?;
//! # Ok(())
//! # }
//! ```

mod attribute;
mod cancel;
mod depth;
mod error;
mod menu;
mod records;
mod visitor;
mod walker;

pub use attribute::{AttributeCollector, AttributeRecord};
pub use cancel::CancelToken;
pub use depth::{Depth, Expansion};
pub use error::NavError;
pub use menu::{Menu, MenuChildren, MenuEntryCollector, MenuOptions, MenuRecord};
pub use records::{Keyed, RecordMap};
pub use visitor::NodeVisitor;
pub use walker::{HierarchyWalker, WalkerConfig};
