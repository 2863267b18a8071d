//! Hierarchy walker.
//!
//! Translates urls through the [`PathMapper`], reads nodes from the
//! [`TreeStore`] and drives visitors over them to build child lists,
//! breadcrumbs and menu trees.
//!
//! # Menu construction
//!
//! The root is visited first to obtain its own record. Each level is then
//! visited with a fresh [`MenuEntryCollector`] and every resulting entry is
//! expanded according to [`Expansion::decide`]:
//!
//! ```text
//! root (active)
//!  ├─ /a            not active, budget exhausted  -> NotExpanded
//!  ├─ /b (active)   always expanded
//!  │   ├─ /b/x      not active, budget exhausted  -> NotExpanded
//!  │   └─ /b/y      leaf                          -> []
//!  └─ /c            not active, budget exhausted  -> NotExpanded
//! ```
//!
//! The tree behind the store must be acyclic; with [`Depth::Unlimited`] the
//! walker follows every branch to its leaves.

use std::sync::Arc;

use nav_store::{NodeHandle, PathMapper, TreeStore, normalize_url};
use rayon::prelude::*;

use crate::attribute::{AttributeCollector, AttributeRecord};
use crate::cancel::CancelToken;
use crate::depth::{Depth, Expansion};
use crate::error::NavError;
use crate::menu::{Menu, MenuChildren, MenuEntryCollector, MenuOptions, MenuRecord};
use crate::records::RecordMap;
use crate::visitor::NodeVisitor;

/// Walker configuration.
#[derive(Clone, Debug)]
pub struct WalkerConfig {
    /// Node property holding the display title.
    pub title_property: String,
    /// Expand sibling subtrees of a menu level in parallel.
    pub parallel: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            title_property: "label".to_owned(),
            parallel: false,
        }
    }
}

/// Builds navigation structures from a content tree.
///
/// The navigation root (the node URL `/` maps to) is resolved once at
/// construction. All operations are read-only and independent of each
/// other, so one walker can serve concurrent requests.
pub struct HierarchyWalker {
    store: Arc<dyn TreeStore>,
    mapper: Arc<dyn PathMapper>,
    root: NodeHandle,
    config: WalkerConfig,
}

impl HierarchyWalker {
    /// Create a walker and resolve the navigation root.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::RootNotFound`] if the store has no node at the
    /// storage id URL `/` maps to.
    pub fn new(
        store: Arc<dyn TreeStore>,
        mapper: Arc<dyn PathMapper>,
        config: WalkerConfig,
    ) -> Result<Self, NavError> {
        let storage_id = mapper.storage_id("/");
        let root = store
            .node(&storage_id)?
            .filter(NodeHandle::is_node)
            .ok_or(NavError::RootNotFound { storage_id })?;

        tracing::debug!(root = %root, title_property = %config.title_property, "Navigation root resolved");

        Ok(Self {
            store,
            mapper,
            root,
            config,
        })
    }

    /// Handle of the navigation root.
    #[must_use]
    pub fn root(&self) -> &NodeHandle {
        &self.root
    }

    /// Walker configuration.
    #[must_use]
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Direct children of the node at `url`, as `url -> title` records.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NodeNotFound`] if `url` does not resolve.
    pub fn child_list(&self, url: &str) -> Result<RecordMap<AttributeRecord>, NavError> {
        self.child_list_with_cancel(url, &CancelToken::new())
    }

    /// [`child_list`](Self::child_list) with cancellation.
    pub fn child_list_with_cancel(
        &self,
        url: &str,
        cancel: &CancelToken,
    ) -> Result<RecordMap<AttributeRecord>, NavError> {
        let mut visitor = self.attribute_collector();
        self.walk_children(url, &mut visitor, cancel)?;
        Ok(visitor.into_result())
    }

    /// Let `visitor` visit the direct children of the node at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NodeNotFound`] if `url` does not resolve, or any
    /// error raised by the visitor.
    pub fn visit_children<V: NodeVisitor>(&self, url: &str, visitor: &mut V) -> Result<(), NavError> {
        self.walk_children(url, visitor, &CancelToken::new())
    }

    /// Ancestors of the node at `url`, from the navigation root down to the
    /// parent. The node itself is not included.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NodeNotFound`] if `url` does not resolve and
    /// [`NavError::AncestorResolution`] if the store's ancestor chain does
    /// not lead back to the node.
    pub fn ancestors(&self, url: &str) -> Result<RecordMap<AttributeRecord>, NavError> {
        self.ancestors_with_cancel(url, &CancelToken::new())
    }

    /// [`ancestors`](Self::ancestors) with cancellation.
    pub fn ancestors_with_cancel(
        &self,
        url: &str,
        cancel: &CancelToken,
    ) -> Result<RecordMap<AttributeRecord>, NavError> {
        let mut visitor = self.attribute_collector();
        self.walk_ancestors(url, &mut visitor, cancel)?;
        Ok(visitor.into_result())
    }

    /// Let `visitor` visit the ancestors of the node at `url`, root first.
    pub fn visit_ancestors<V: NodeVisitor>(&self, url: &str, visitor: &mut V) -> Result<(), NavError> {
        self.walk_ancestors(url, visitor, &CancelToken::new())
    }

    /// Build the menu tree leading to `url`.
    ///
    /// Entries on the path to `url` are always expanded; other entries are
    /// expanded as far as `options.depth` allows and carry
    /// [`MenuChildren::NotExpanded`] beyond that.
    ///
    /// # Errors
    ///
    /// Fails with the first store or visitor error; no partial menu is
    /// returned.
    pub fn menu(&self, url: &str, options: MenuOptions) -> Result<Menu, NavError> {
        self.menu_with_cancel(url, options, &CancelToken::new())
    }

    /// [`menu`](Self::menu) with cancellation.
    pub fn menu_with_cancel(
        &self,
        url: &str,
        options: MenuOptions,
        cancel: &CancelToken,
    ) -> Result<Menu, NavError> {
        let active_url = normalize_url(url);
        cancel.check()?;

        let mut collector = self.menu_collector(&active_url);
        collector.visit(&self.root)?;
        let mut records = collector.into_result().into_vec();
        if records.len() != 1 {
            return Err(NavError::InternalInvariant(format!(
                "expected exactly one record for the navigation root, got {}",
                records.len()
            )));
        }
        let mut root = records.swap_remove(0);

        let children = self.expand_level(&root.node, &active_url, options.depth, 0, cancel)?;
        tracing::debug!(
            url = %active_url,
            depth = i64::from(options.depth),
            top_level = children.len(),
            "Menu built"
        );

        if options.include_root {
            root.children = MenuChildren::Expanded(children);
            Ok(Menu::Root(root))
        } else {
            Ok(Menu::Items(children))
        }
    }

    /// Full menu tree with the root included.
    pub fn sitemap(&self) -> Result<Menu, NavError> {
        self.sitemap_with_cancel(&CancelToken::new())
    }

    /// [`sitemap`](Self::sitemap) with cancellation.
    pub fn sitemap_with_cancel(&self, cancel: &CancelToken) -> Result<Menu, NavError> {
        let options = MenuOptions {
            depth: Depth::Unlimited,
            include_root: true,
        };
        self.menu_with_cancel("/", options, cancel)
    }

    fn attribute_collector(&self) -> AttributeCollector<'_> {
        AttributeCollector::new(
            self.store.as_ref(),
            self.mapper.as_ref(),
            &self.config.title_property,
        )
    }

    fn menu_collector(&self, active_url: &str) -> MenuEntryCollector<'_> {
        MenuEntryCollector::new(
            self.store.as_ref(),
            self.mapper.as_ref(),
            &self.config.title_property,
            active_url,
        )
    }

    /// Resolve a url to its node. Non-node items do not resolve.
    fn resolve(&self, url: &str) -> Result<NodeHandle, NavError> {
        let storage_id = self.mapper.storage_id(url);
        self.store
            .node(&storage_id)?
            .filter(NodeHandle::is_node)
            .ok_or_else(|| NavError::NodeNotFound {
                url: normalize_url(url),
            })
    }

    fn walk_children<V: NodeVisitor>(
        &self,
        url: &str,
        visitor: &mut V,
        cancel: &CancelToken,
    ) -> Result<(), NavError> {
        let node = self.resolve(url)?;
        for child in self.store.children(&node)? {
            cancel.check()?;
            visitor.visit(&child)?;
        }
        Ok(())
    }

    /// Visit ancestors from the navigation root's depth down to the node.
    ///
    /// The loop is bounded by the depth difference between the root and
    /// the node: the ancestor at the node's own depth must be the node.
    fn walk_ancestors<V: NodeVisitor>(
        &self,
        url: &str,
        visitor: &mut V,
        cancel: &CancelToken,
    ) -> Result<(), NavError> {
        let node = self.resolve(url)?;
        let root_depth = self.root.depth();
        let node_depth = node.depth();
        let unresolved = || NavError::AncestorResolution {
            url: normalize_url(url),
            root_depth,
            node_depth,
        };

        if node_depth < root_depth {
            return Err(unresolved());
        }

        for depth in root_depth..=node_depth {
            cancel.check()?;
            let ancestor = self.store.ancestor(&node, depth)?;
            if ancestor == node {
                return Ok(());
            }
            visitor.visit(&ancestor)?;
        }

        tracing::warn!(url = %url, root_depth, node_depth, "Ancestor chain did not reach node");
        Err(unresolved())
    }

    /// Build the menu entries for the children of `parent`.
    ///
    /// `curdepth` counts the levels below the nearest active ancestor.
    fn expand_level(
        &self,
        parent: &NodeHandle,
        active_url: &str,
        depth: Depth,
        curdepth: u32,
        cancel: &CancelToken,
    ) -> Result<Vec<MenuRecord>, NavError> {
        let mut collector = self.menu_collector(active_url);
        for child in self.store.children(parent)? {
            cancel.check()?;
            collector.visit(&child)?;
        }
        let records = collector.into_result().into_vec();

        let expand = |mut record: MenuRecord| -> Result<MenuRecord, NavError> {
            let expansion = Expansion::decide(record.active, curdepth, depth);
            record.children = match expansion.child_depth() {
                Some(next) => MenuChildren::Expanded(self.expand_level(
                    &record.node,
                    active_url,
                    depth,
                    next,
                    cancel,
                )?),
                None => MenuChildren::NotExpanded,
            };
            Ok(record)
        };

        if self.config.parallel {
            records.into_par_iter().map(expand).collect()
        } else {
            records.into_iter().map(expand).collect()
        }
    }
}
