//! Port definition for the durable attachment store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{Attachment, AttachmentKey};
use crate::domain::errors::CacheResult;

/// Port for the durable URL-keyed attachment store.
///
/// Entries survive process restarts. Once a key is present the gate is
/// bypassed for all future encounters of that URL. Writes are idempotent and
/// last-write-wins. Implementations must be thread-safe.
#[async_trait]
pub trait AttachmentStorePort: Send + Sync {
    /// Retrieves a stored attachment. Returns None if absent or unreadable.
    async fn get(&self, key: &AttachmentKey) -> Option<Arc<Attachment>>;

    /// Stores an attachment under a key.
    async fn put(&self, key: &AttachmentKey, attachment: &Attachment) -> CacheResult<()>;

    /// Returns true if the key is present.
    async fn contains(&self, key: &AttachmentKey) -> bool;

    /// Removes an entry if present.
    async fn remove(&self, key: &AttachmentKey);

    /// Returns the current number of stored entries.
    async fn len(&self) -> usize;

    /// Returns true if the store is empty.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes all entries.
    async fn clear(&self) -> CacheResult<()>;
}
