//! Process-lifetime record of attachment URLs loaded this session.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// Ephemeral set of attachment URLs that finished loading this session.
///
/// Clone-shared handle; initializes empty per process and is never
/// persisted. The durable store is a separate concern.
#[derive(Debug, Clone)]
pub struct SessionUrlSet {
    inner: Arc<RwLock<HashSet<String>>>,
}

impl SessionUrlSet {
    /// Creates an empty session set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Records a URL as loaded. Idempotent.
    pub fn insert(&self, url: impl Into<String>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.insert(url.into());
        }
    }

    /// Returns true if the URL was loaded this session.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.inner
            .read()
            .ok()
            .is_some_and(|inner| inner.contains(url))
    }

    /// Forgets all URLs.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.clear();
        }
    }

    /// Returns the number of recorded URLs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().ok().map_or(0, |inner| inner.len())
    }

    /// Returns true if no URL has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionUrlSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let set = SessionUrlSet::new();
        assert!(!set.contains("https://example.com/a"));

        set.insert("https://example.com/a");
        assert!(set.contains("https://example.com/a"));
        assert_eq!(set.len(), 1);

        // Idempotent.
        set.insert("https://example.com/a");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_clear() {
        let set = SessionUrlSet::new();
        set.insert("u1");
        set.insert("u2");
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_shared_across_clones() {
        use std::thread;

        let set = SessionUrlSet::new();
        let clone = set.clone();

        let handle = thread::spawn(move || {
            clone.insert("u1");
        });

        handle.join().unwrap();
        assert!(set.contains("u1"));
    }
}
