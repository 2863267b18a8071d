//! Menu records and the collector that produces them.

use nav_store::{NodeHandle, PathMapper, TreeStore, is_within, normalize_url};
use serde::Serialize;
use serde::ser::Serializer;

use crate::depth::Depth;
use crate::error::NavError;
use crate::records::{Keyed, RecordMap};
use crate::visitor::{EntryReader, NodeVisitor};

/// One entry of a menu tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuRecord {
    /// Public url.
    pub url: String,
    /// Display title.
    pub title: String,
    /// Whether this entry is the requested url or one of its ancestors.
    pub active: bool,
    /// Store handle used to enumerate the entry's children.
    #[serde(skip)]
    pub node: NodeHandle,
    /// Child entries.
    pub children: MenuChildren,
}

impl Keyed for MenuRecord {
    fn key(&self) -> &str {
        &self.url
    }
}

/// Children of a menu entry.
///
/// Serializes as an array when expanded and as `false` otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MenuChildren {
    /// Children in store order (empty for leaves).
    Expanded(Vec<MenuRecord>),
    /// The depth budget excluded the children from this result.
    #[default]
    NotExpanded,
}

impl MenuChildren {
    /// Whether the children were materialized.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Expanded(_))
    }

    /// Expanded children, or `None` if not expanded.
    #[must_use]
    pub fn as_slice(&self) -> Option<&[MenuRecord]> {
        match self {
            Self::Expanded(children) => Some(children),
            Self::NotExpanded => None,
        }
    }
}

impl Serialize for MenuChildren {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Expanded(children) => children.serialize(serializer),
            Self::NotExpanded => serializer.serialize_bool(false),
        }
    }
}

/// Options for building a menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuOptions {
    /// Expansion budget for entries off the active path.
    pub depth: Depth,
    /// Return the root entry instead of its children.
    pub include_root: bool,
}

/// Result of a menu query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Menu {
    /// The navigation root with its children attached.
    Root(MenuRecord),
    /// The navigation root's children.
    Items(Vec<MenuRecord>),
}

impl Menu {
    /// Top-level entries below the navigation root.
    #[must_use]
    pub fn items(&self) -> &[MenuRecord] {
        match self {
            Self::Root(root) => root.children.as_slice().unwrap_or_default(),
            Self::Items(items) => items,
        }
    }
}

/// Visitor collecting a [`MenuRecord`] per node.
///
/// A node is flagged active when the requested url equals its url or lies
/// below it, compared segment by segment.
pub struct MenuEntryCollector<'a> {
    reader: EntryReader<'a>,
    active_url: String,
    records: RecordMap<MenuRecord>,
}

impl<'a> MenuEntryCollector<'a> {
    /// Create a collector flagging the path to `active_url`.
    #[must_use]
    pub fn new(
        store: &'a dyn TreeStore,
        mapper: &'a dyn PathMapper,
        title_property: &'a str,
        active_url: &str,
    ) -> Self {
        Self {
            reader: EntryReader::new(store, mapper, title_property),
            active_url: normalize_url(active_url),
            records: RecordMap::new(),
        }
    }
}

impl NodeVisitor for MenuEntryCollector<'_> {
    type Record = MenuRecord;

    fn visit(&mut self, node: &NodeHandle) -> Result<(), NavError> {
        let (url, title) = self.reader.read(node)?;
        let active = is_within(&self.active_url, &url);
        self.records.insert(MenuRecord {
            url,
            title,
            active,
            node: node.clone(),
            children: MenuChildren::NotExpanded,
        });
        Ok(())
    }

    fn reset(&mut self) {
        self.records.clear();
    }

    fn result(&self) -> &RecordMap<MenuRecord> {
        &self.records
    }

    fn into_result(self) -> RecordMap<MenuRecord> {
        self.records
    }
}
