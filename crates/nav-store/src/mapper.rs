//! URL to storage id mapping.
//!
//! URLs are the public addresses of navigation entries (`/`, `/about`,
//! `/about/team`). Storage ids are the addresses of the same nodes inside
//! the tree store. A [`PathMapper`] translates between the two.

/// Bidirectional translation between public URLs and storage ids.
///
/// The two directions must be pure and approximately inverse. Callers are
/// expected to reject URLs with `..` segments before asking for a mapping.
pub trait PathMapper: Send + Sync {
    /// Storage id for a public URL.
    fn storage_id(&self, url: &str) -> String;

    /// Public URL for a storage id.
    fn url(&self, storage_id: &str) -> String;
}

/// Normalize a URL or storage id.
///
/// Adds the leading slash, collapses repeated slashes and drops the trailing
/// slash. The empty string becomes `/`.
///
/// ```
/// use nav_store::normalize_url;
///
/// assert_eq!(normalize_url("test/"), "/test");
/// assert_eq!(normalize_url("//a//b/"), "/a/b");
/// assert_eq!(normalize_url(""), "/");
/// ```
#[must_use]
pub fn normalize_url(url: &str) -> String {
    let mut normalized = String::with_capacity(url.len() + 1);
    for segment in url.split('/').filter(|s| !s.is_empty()) {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Whether `url` equals `ancestor` or lies below it.
///
/// The comparison is segment-aware: `/bla` contains `/bla/x` but not
/// `/blabla`.
///
/// ```
/// use nav_store::is_within;
///
/// assert!(is_within("/bla/x", "/bla"));
/// assert!(!is_within("/blabla", "/bla"));
/// ```
#[must_use]
pub fn is_within(url: &str, ancestor: &str) -> bool {
    let url = normalize_url(url);
    let ancestor = normalize_url(ancestor);
    if ancestor == "/" {
        return true;
    }
    url.strip_prefix(&ancestor)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Maps URLs onto the subtree below a fixed storage id.
///
/// URL `/` is the base id, `/a/b` is `<base>/a/b`. Storage ids outside the
/// base map to themselves.
#[derive(Clone, Debug)]
pub struct PrefixMapper {
    base: String,
}

impl PrefixMapper {
    /// Create a mapper rooted at `base`.
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: normalize_url(base),
        }
    }

    /// Storage id that URL `/` maps to.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl PathMapper for PrefixMapper {
    fn storage_id(&self, url: &str) -> String {
        let url = normalize_url(url);
        if url == "/" {
            self.base.clone()
        } else if self.base == "/" {
            url
        } else {
            format!("{}{url}", self.base)
        }
    }

    fn url(&self, storage_id: &str) -> String {
        let id = normalize_url(storage_id);
        if self.base == "/" {
            return id;
        }
        match id.strip_prefix(&self.base) {
            Some("") => "/".to_owned(),
            Some(rest) if rest.starts_with('/') => rest.to_owned(),
            _ => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("/"), "/");
        assert_eq!(normalize_url(""), "/");
        assert_eq!(normalize_url("test/"), "/test");
        assert_eq!(normalize_url("/test/leveltwo/"), "/test/leveltwo");
        assert_eq!(normalize_url("a//b"), "/a/b");
    }

    #[test]
    fn test_is_within_self_and_descendants() {
        assert!(is_within("/test", "/test"));
        assert!(is_within("/test/leveltwo", "/test"));
        assert!(is_within("/test/leveltwo/", "test"));
    }

    #[test]
    fn test_is_within_rejects_longer_sibling_name() {
        assert!(!is_within("/blabla", "/bla"));
        assert!(!is_within("/bla", "/bla/x"));
    }

    #[test]
    fn test_is_within_root_contains_everything() {
        assert!(is_within("/", "/"));
        assert!(is_within("/anything/below", "/"));
    }

    #[test]
    fn test_prefix_mapper_storage_id() {
        let mapper = PrefixMapper::new("/cms/navigation/main");

        assert_eq!(mapper.storage_id("/"), "/cms/navigation/main");
        assert_eq!(mapper.storage_id("test/"), "/cms/navigation/main/test");
        assert_eq!(
            mapper.storage_id("/test/leveltwo"),
            "/cms/navigation/main/test/leveltwo"
        );
    }

    #[test]
    fn test_prefix_mapper_url() {
        let mapper = PrefixMapper::new("/cms/navigation/main/");

        assert_eq!(mapper.url("/cms/navigation/main"), "/");
        assert_eq!(mapper.url("/cms/navigation/main/test"), "/test");
        // Shares a byte prefix with the base but is a different node
        assert_eq!(mapper.url("/cms/navigation/mainly"), "/cms/navigation/mainly");
        assert_eq!(mapper.url("/other"), "/other");
    }

    #[test]
    fn test_prefix_mapper_repository_root() {
        let mapper = PrefixMapper::new("/");

        assert_eq!(mapper.storage_id("/"), "/");
        assert_eq!(mapper.storage_id("a/b"), "/a/b");
        assert_eq!(mapper.url("/a/b"), "/a/b");
    }
}
