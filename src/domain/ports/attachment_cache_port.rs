//! Port definition for the ephemeral decoded-attachment cache.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{Attachment, AttachmentKey};

/// Port for the fast in-memory attachment cache.
///
/// Purely an acceleration tier in front of the durable store; contents are
/// lost on restart and presence here never influences the gate.
/// Implementations must be thread-safe.
#[async_trait]
pub trait AttachmentCachePort: Send + Sync {
    /// Attempts to get an attachment from the cache.
    async fn get(&self, key: &AttachmentKey) -> Option<Arc<Attachment>>;

    /// Stores an attachment in the cache.
    async fn put(&self, key: AttachmentKey, attachment: Arc<Attachment>);

    /// Removes an attachment from the cache.
    async fn evict(&self, key: &AttachmentKey);

    /// Returns the current number of cached attachments.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all attachments from the cache.
    async fn clear(&self);
}
