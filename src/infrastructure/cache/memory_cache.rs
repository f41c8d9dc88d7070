//! In-memory LRU attachment cache implementation.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::{Attachment, AttachmentKey};
use crate::domain::ports::AttachmentCachePort;

/// Default maximum number of decoded attachments to cache in memory.
pub const DEFAULT_CACHE_ENTRIES: usize = 32;

/// In-memory LRU cache for decoded attachments.
/// Thread-safe and optimized for frequent reads.
pub struct MemoryAttachmentCache {
    cache: RwLock<LruCache<AttachmentKey, Arc<Attachment>>>,
    hits: std::sync::atomic::AtomicU64,
    misses: std::sync::atomic::AtomicU64,
}

impl MemoryAttachmentCache {
    /// Creates a new cache with the specified capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: RwLock::new(LruCache::new(cap)),
            hits: std::sync::atomic::AtomicU64::new(0),
            misses: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Creates a new cache with the default capacity.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_ENTRIES)
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(std::sync::atomic::Ordering::Relaxed);
        let misses = self.misses.load(std::sync::atomic::Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }

    /// Peeks at an attachment without promoting it in the LRU.
    pub async fn peek(&self, key: &AttachmentKey) -> Option<Arc<Attachment>> {
        let cache = self.cache.read().await;
        cache.peek(key).cloned()
    }
}

impl Default for MemoryAttachmentCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached attachments.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} attachments, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

#[async_trait]
impl AttachmentCachePort for MemoryAttachmentCache {
    async fn get(&self, key: &AttachmentKey) -> Option<Arc<Attachment>> {
        let mut cache = self.cache.write().await;
        if let Some(attachment) = cache.get(key) {
            self.hits.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            trace!(key = %key, "Memory cache hit");
            Some(attachment.clone())
        } else {
            self.misses
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            trace!(key = %key, "Memory cache miss");
            None
        }
    }

    async fn put(&self, key: AttachmentKey, attachment: Arc<Attachment>) {
        let mut cache = self.cache.write().await;
        debug!(key = %key, "Storing attachment in memory cache");
        cache.put(key, attachment);
    }

    async fn evict(&self, key: &AttachmentKey) {
        let mut cache = self.cache.write().await;
        if cache.pop(key).is_some() {
            debug!(key = %key, "Evicted attachment from memory cache");
        }
    }

    fn len(&self) -> usize {
        // Best-effort estimate; may be briefly stale under contention.
        let cache = self.cache.try_read();
        cache.map(|c| c.len()).unwrap_or(0)
    }

    async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.clear();
        debug!("Cleared memory attachment cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str) -> Arc<Attachment> {
        Arc::new(Attachment::new(name, "image/png", vec![0u8; 8]))
    }

    #[tokio::test]
    async fn test_cache_put_and_get() {
        let cache = MemoryAttachmentCache::new(10);
        let key = AttachmentKey::new("k1");

        cache.put(key.clone(), payload("a.png")).await;
        let retrieved = cache.get(&key).await;

        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().filename, "a.png");
    }

    #[tokio::test]
    async fn test_cache_miss() {
        let cache = MemoryAttachmentCache::new(10);
        assert!(cache.get(&AttachmentKey::new("missing")).await.is_none());
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let cache = MemoryAttachmentCache::new(2);

        let k1 = AttachmentKey::new("k1");
        let k2 = AttachmentKey::new("k2");
        let k3 = AttachmentKey::new("k3");

        cache.put(k1.clone(), payload("1")).await;
        cache.put(k2.clone(), payload("2")).await;
        cache.put(k3.clone(), payload("3")).await;

        // k1 should be evicted (LRU)
        assert!(cache.get(&k1).await.is_none());
        assert!(cache.get(&k2).await.is_some());
        assert!(cache.get(&k3).await.is_some());
    }

    #[tokio::test]
    async fn test_cache_stats() {
        let cache = MemoryAttachmentCache::new(10);
        let key = AttachmentKey::new("k1");

        cache.put(key.clone(), payload("a.png")).await;

        let _ = cache.get(&key).await;
        let _ = cache.get(&AttachmentKey::new("missing")).await;

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_peek_does_not_promote() {
        let cache = MemoryAttachmentCache::new(2);

        let k1 = AttachmentKey::new("k1");
        let k2 = AttachmentKey::new("k2");

        cache.put(k1.clone(), payload("1")).await;
        cache.put(k2.clone(), payload("2")).await;

        let _ = cache.peek(&k1).await;

        cache.put(AttachmentKey::new("k3"), payload("3")).await;
        assert!(cache.peek(&k1).await.is_none());
    }
}
