//! Filesystem tree store for content navigation.
//!
//! This crate provides [`FsTreeStore`], a filesystem-based implementation of
//! the [`TreeStore`](nav_store::TreeStore) trait:
//!
//! - Every directory below the source directory is a node; storage id
//!   `/a/b` is the directory `<source_dir>/a/b`
//! - Node properties come from a YAML sidecar file (default `meta.yaml`)
//! - Children are sub-directories, listed first in the order named by the
//!   sidecar's `order` key, then by directory name
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use nav_store::TreeStore;
//! use nav_store_fs::FsTreeStore;
//!
//! let store = FsTreeStore::new(PathBuf::from("content"));
//! let root = store.node("/")?.unwrap();
//! for child in store.children(&root)? {
//!     println!("{}: {:?}", child.id(), store.property(&child, "label")?);
//! }
//! ```

mod yaml;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use nav_store::{NodeHandle, StoreError, StoreErrorKind, TreeStore, normalize_url};

use yaml::{NodeMeta, parse_node_meta};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default name of the node property file.
const DEFAULT_META_FILENAME: &str = "meta.yaml";

/// Filesystem-backed tree store.
#[derive(Debug)]
pub struct FsTreeStore {
    source_dir: PathBuf,
    meta_filename: String,
}

impl FsTreeStore {
    /// Create a store rooted at `source_dir` using `meta.yaml` property files.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self::with_meta_filename(source_dir, DEFAULT_META_FILENAME)
    }

    /// Create a store with a custom property file name.
    #[must_use]
    pub fn with_meta_filename(source_dir: PathBuf, meta_filename: &str) -> Self {
        Self {
            source_dir,
            meta_filename: meta_filename.to_owned(),
        }
    }

    /// Directory backing the repository root.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Resolve a storage id to its directory.
    ///
    /// Rejects ids containing `.` or `..` segments.
    fn resolve(&self, id: &str) -> Result<(String, PathBuf), StoreError> {
        let id = normalize_url(id);
        let mut path = self.source_dir.clone();
        for segment in id.split('/').filter(|s| !s.is_empty()) {
            if segment == ".." || segment == "." {
                return Err(StoreError::new(StoreErrorKind::InvalidPath)
                    .with_id(id.as_str())
                    .with_backend(BACKEND));
            }
            path.push(segment);
        }
        Ok((id, path))
    }

    /// Whether `path` is an existing directory.
    fn is_dir(path: &Path, id: &str) -> Result<bool, StoreError> {
        match fs::metadata(path) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(e, Some(id.to_owned())).with_backend(BACKEND)),
        }
    }

    /// Load the property file of a node directory.
    ///
    /// A missing file yields empty metadata.
    fn load_meta(&self, dir: &Path, id: &str) -> Result<NodeMeta, StoreError> {
        let meta_path = dir.join(&self.meta_filename);
        let content = match fs::read_to_string(&meta_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(NodeMeta::default()),
            Err(e) => return Err(StoreError::io(e, Some(id.to_owned())).with_backend(BACKEND)),
        };
        parse_node_meta(&content).map_err(|e| {
            tracing::warn!(path = %meta_path.display(), error = %e, "Failed to parse node properties");
            StoreError::new(StoreErrorKind::Other)
                .with_id(id)
                .with_backend(BACKEND)
                .with_source(e)
        })
    }
}

impl TreeStore for FsTreeStore {
    fn node(&self, id: &str) -> Result<Option<NodeHandle>, StoreError> {
        let (id, path) = self.resolve(id)?;
        if Self::is_dir(&path, &id)? {
            Ok(Some(NodeHandle::new(id)))
        } else {
            Ok(None)
        }
    }

    fn children(&self, node: &NodeHandle) -> Result<Vec<NodeHandle>, StoreError> {
        let (id, dir) = self.resolve(node.id())?;
        let entries = fs::read_dir(&dir)
            .map_err(|e| StoreError::io(e, Some(id.clone())).with_backend(BACKEND))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(e, Some(id.clone())).with_backend(BACKEND))?;
            let is_dir = entry
                .file_type()
                .map_err(|e| StoreError::io(e, Some(id.clone())).with_backend(BACKEND))?
                .is_dir();
            if !is_dir {
                continue;
            }
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!(parent = %id, name = ?raw, "Skipping directory with non UTF-8 name");
                    continue;
                }
            };
            if !name.starts_with('.') {
                names.push(name);
            }
        }
        names.sort();

        let meta = self.load_meta(&dir, &id)?;
        let ordered = order_children(names, &meta.order);
        tracing::trace!(id = %id, count = ordered.len(), "Listed children");

        let prefix = if id == "/" { "" } else { id.as_str() };
        Ok(ordered
            .into_iter()
            .map(|name| NodeHandle::new(format!("{prefix}/{name}")))
            .collect())
    }

    fn ancestor(&self, node: &NodeHandle, depth: usize) -> Result<NodeHandle, StoreError> {
        let id = node.ancestor_id(depth).ok_or_else(|| {
            StoreError::new(StoreErrorKind::InvalidPath)
                .with_id(node.id())
                .with_backend(BACKEND)
        })?;
        self.node(&id)?
            .ok_or_else(|| StoreError::not_found(id).with_backend(BACKEND))
    }

    fn property(&self, node: &NodeHandle, name: &str) -> Result<Option<String>, StoreError> {
        let (id, dir) = self.resolve(node.id())?;
        let mut meta = self.load_meta(&dir, &id)?;
        Ok(meta.properties.remove(name))
    }
}

/// Order child names: names listed in `order` first (if present), then the rest.
fn order_children(mut names: Vec<String>, order: &[String]) -> Vec<String> {
    let mut ordered = Vec::with_capacity(names.len());
    for wanted in order {
        if let Some(pos) = names.iter().position(|name| name == wanted) {
            ordered.push(names.remove(pos));
        }
    }
    ordered.extend(names);
    ordered
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn create_node(root: &Path, rel: &str, meta: &str) {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("meta.yaml"), meta).unwrap();
    }

    fn fixture() -> (TempDir, FsTreeStore) {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        create_node(root, "", "label: Home");
        create_node(root, "test", "label: nav test");
        create_node(root, "test/leveltwo", "label: nav leveltwo");
        create_node(root, "test/otherleveltwo", "label: nav otherleveltwo");
        let store = FsTreeStore::new(root.to_path_buf());
        (temp, store)
    }

    fn ids(handles: &[NodeHandle]) -> Vec<&str> {
        handles.iter().map(NodeHandle::id).collect()
    }

    #[test]
    fn test_node_root() {
        let (_temp, store) = fixture();

        let root = store.node("/").unwrap().unwrap();

        assert_eq!(root.id(), "/");
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_node_missing() {
        let (_temp, store) = fixture();

        assert!(store.node("/missing").unwrap().is_none());
    }

    #[test]
    fn test_node_file_is_not_a_node() {
        let (temp, store) = fixture();
        fs::write(temp.path().join("test/readme.txt"), "text").unwrap();

        assert!(store.node("/test/readme.txt").unwrap().is_none());
    }

    #[test]
    fn test_node_rejects_parent_segments() {
        let (_temp, store) = fixture();

        let err = store.node("/test/../../etc").unwrap_err();

        assert_eq!(err.kind, StoreErrorKind::InvalidPath);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_children_sorted_by_name() {
        let (_temp, store) = fixture();
        let test = store.node("/test").unwrap().unwrap();

        let children = store.children(&test).unwrap();

        assert_eq!(
            ids(&children),
            vec!["/test/leveltwo", "/test/otherleveltwo"]
        );
    }

    #[test]
    fn test_children_skip_hidden_dirs_and_files() {
        let (temp, store) = fixture();
        fs::create_dir_all(temp.path().join("test/.git")).unwrap();
        fs::write(temp.path().join("test/notes.md"), "# Notes").unwrap();
        let test = store.node("/test").unwrap().unwrap();

        let children = store.children(&test).unwrap();

        assert_eq!(children.len(), 2);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_children_skip_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (temp, store) = fixture();
        let bad = temp.path().join("test").join(OsStr::from_bytes(b"bad\xffname"));
        fs::create_dir_all(bad.join("sub")).unwrap();
        let test = store.node("/test").unwrap().unwrap();

        let children = store.children(&test).unwrap();

        assert_eq!(
            ids(&children),
            vec!["/test/leveltwo", "/test/otherleveltwo"]
        );
        for child in &children {
            assert!(store.node(child.id()).unwrap().is_some());
        }
    }

    #[test]
    fn test_children_explicit_order() {
        let (temp, store) = fixture();
        create_node(temp.path(), "test/alpha", "label: Alpha");
        fs::write(
            temp.path().join("test/meta.yaml"),
            "label: nav test\norder: [otherleveltwo, missing]",
        )
        .unwrap();
        let test = store.node("/test").unwrap().unwrap();

        let children = store.children(&test).unwrap();

        assert_eq!(
            ids(&children),
            vec!["/test/otherleveltwo", "/test/alpha", "/test/leveltwo"]
        );
    }

    #[test]
    fn test_children_of_root() {
        let (_temp, store) = fixture();
        let root = store.node("/").unwrap().unwrap();

        assert_eq!(ids(&store.children(&root).unwrap()), vec!["/test"]);
    }

    #[test]
    fn test_ancestor() {
        let (_temp, store) = fixture();
        let leaf = store.node("/test/leveltwo").unwrap().unwrap();

        assert_eq!(store.ancestor(&leaf, 0).unwrap().id(), "/");
        assert_eq!(store.ancestor(&leaf, 1).unwrap().id(), "/test");
        assert_eq!(store.ancestor(&leaf, 2).unwrap(), leaf);
        assert_eq!(
            store.ancestor(&leaf, 3).unwrap_err().kind,
            StoreErrorKind::InvalidPath
        );
    }

    #[test]
    fn test_property() {
        let (_temp, store) = fixture();
        let leaf = store.node("/test/leveltwo").unwrap().unwrap();

        assert_eq!(
            store.property(&leaf, "label").unwrap(),
            Some("nav leveltwo".to_owned())
        );
        assert_eq!(store.property(&leaf, "missing").unwrap(), None);
    }

    #[test]
    fn test_property_without_meta_file() {
        let (temp, store) = fixture();
        fs::create_dir_all(temp.path().join("bare")).unwrap();
        let bare = store.node("/bare").unwrap().unwrap();

        assert_eq!(store.property(&bare, "label").unwrap(), None);
    }

    #[test]
    fn test_property_custom_meta_filename() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("a")).unwrap();
        fs::write(temp.path().join("a/node.yml"), "label: A").unwrap();
        let store = FsTreeStore::with_meta_filename(temp.path().to_path_buf(), "node.yml");
        let a = store.node("/a").unwrap().unwrap();

        assert_eq!(store.property(&a, "label").unwrap(), Some("A".to_owned()));
    }

    #[test]
    fn test_property_malformed_meta() {
        let (temp, store) = fixture();
        create_node(temp.path(), "broken", "label: [unclosed");
        let broken = store.node("/broken").unwrap().unwrap();

        let err = store.property(&broken, "label").unwrap_err();

        assert_eq!(err.kind, StoreErrorKind::Other);
        assert_eq!(err.id.as_deref(), Some("/broken"));
    }

    #[test]
    fn test_order_children() {
        let names = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];

        let ordered = order_children(names, &["c".to_owned(), "x".to_owned()]);

        assert_eq!(ordered, vec!["c", "a", "b"]);
    }
}
