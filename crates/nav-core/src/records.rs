//! Ordered url-keyed record accumulator.
//!
//! Records are stored in a flat `Vec` in insertion order with a `HashMap`
//! index from url to position, so lookups are O(1) and iteration follows
//! the traversal order.

use std::collections::HashMap;

use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

/// A record addressed by its url.
pub trait Keyed {
    /// Key the record is stored under.
    fn key(&self) -> &str;
}

/// Ordered mapping from url to record.
///
/// Inserting a record whose url is already present replaces the earlier
/// record in place, keeping its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordMap<R> {
    records: Vec<R>,
    index: HashMap<String, usize>,
}

impl<R> Default for RecordMap<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<R: Keyed> RecordMap<R> {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced.
    pub fn insert(&mut self, record: R) -> Option<R> {
        if let Some(&pos) = self.index.get(record.key()) {
            return Some(std::mem::replace(&mut self.records[pos], record));
        }
        self.index.insert(record.key().to_owned(), self.records.len());
        self.records.push(record);
        None
    }

    /// Record stored under `url`.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&R> {
        self.index.get(url).map(|&pos| &self.records[pos])
    }

    /// Whether a record is stored under `url`.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    /// Remove all records.
    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }
}

impl<R> RecordMap<R> {
    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Records as a slice, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    /// Consume the map, returning the records in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<R> {
        self.records
    }
}

impl<R> IntoIterator for RecordMap<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a RecordMap<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<R: Serialize> Serialize for RecordMap<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in &self.records {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}
