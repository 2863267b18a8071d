//! Collector for flat `url -> title` listings.

use nav_store::{NodeHandle, PathMapper, TreeStore};
use serde::Serialize;

use crate::error::NavError;
use crate::records::{Keyed, RecordMap};
use crate::visitor::{EntryReader, NodeVisitor};

/// Url and title of one navigation node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AttributeRecord {
    /// Public url.
    pub url: String,
    /// Display title.
    pub title: String,
}

impl Keyed for AttributeRecord {
    fn key(&self) -> &str {
        &self.url
    }
}

/// Visitor collecting an [`AttributeRecord`] per node.
///
/// Used for child lists and breadcrumbs.
pub struct AttributeCollector<'a> {
    reader: EntryReader<'a>,
    records: RecordMap<AttributeRecord>,
}

impl<'a> AttributeCollector<'a> {
    /// Create a collector reading titles from `title_property`.
    #[must_use]
    pub fn new(
        store: &'a dyn TreeStore,
        mapper: &'a dyn PathMapper,
        title_property: &'a str,
    ) -> Self {
        Self {
            reader: EntryReader::new(store, mapper, title_property),
            records: RecordMap::new(),
        }
    }
}

impl NodeVisitor for AttributeCollector<'_> {
    type Record = AttributeRecord;

    fn visit(&mut self, node: &NodeHandle) -> Result<(), NavError> {
        let (url, title) = self.reader.read(node)?;
        self.records.insert(AttributeRecord { url, title });
        Ok(())
    }

    fn reset(&mut self) {
        self.records.clear();
    }

    fn result(&self) -> &RecordMap<AttributeRecord> {
        &self.records
    }

    fn into_result(self) -> RecordMap<AttributeRecord> {
        self.records
    }
}
