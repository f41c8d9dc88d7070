//! Attachment loading orchestration.
//!
//! Drives one slot through gate evaluation and a three-tier lookup:
//! memory cache -> durable store -> codec. Successful codec loads write
//! through to the durable store and the session set.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};
use tracing::{debug, info, warn};

use crate::domain::entities::{
    Attachment, AttachmentKey, AttachmentSlot, LoadSource, LoadStatus, LoadedAttachment,
    SessionUrlSet,
};
use crate::domain::errors::LoadError;
use crate::domain::ports::{AttachmentCachePort, AttachmentCodecPort, AttachmentStorePort};
use crate::domain::services::{GateDecision, GatePolicy};

/// Orchestrates gated attachment loading across the cache tiers.
pub struct AttachmentLoader {
    codec: Arc<dyn AttachmentCodecPort>,
    store: Arc<dyn AttachmentStorePort>,
    memory: Arc<dyn AttachmentCachePort>,
    session: SessionUrlSet,
    policy: GatePolicy,
    pending: Mutex<HashSet<AttachmentKey>>,
    pending_done: Notify,
}

impl AttachmentLoader {
    /// Creates a new loader.
    #[must_use]
    pub fn new(
        codec: Arc<dyn AttachmentCodecPort>,
        store: Arc<dyn AttachmentStorePort>,
        memory: Arc<dyn AttachmentCachePort>,
        session: SessionUrlSet,
        policy: GatePolicy,
    ) -> Self {
        Self {
            codec,
            store,
            memory,
            session,
            policy,
            pending: Mutex::new(HashSet::new()),
            pending_done: Notify::new(),
        }
    }

    /// Returns the session set handle.
    #[must_use]
    pub fn session(&self) -> &SessionUrlSet {
        &self.session
    }

    /// Evaluates the gate and loads if allowed.
    ///
    /// On a block the slot stays unloaded with the reason available through
    /// its render state, and `Ok(None)` is returned.
    ///
    /// # Errors
    /// Returns the load error when the gate allowed but the load failed; the
    /// slot is left in the failed state with a retry affordance.
    pub async fn auto_load(
        &self,
        slot: &mut AttachmentSlot,
    ) -> Result<Option<LoadedAttachment>, LoadError> {
        let key = slot.key();
        let already_cached = self.store.contains(&key).await;
        let decision = self
            .policy
            .decide(slot.descriptor(), slot.sender(), already_cached);

        match decision {
            GateDecision::Block(reason) => {
                debug!(key = %key, reason = %reason, "Auto-load blocked");
                slot.block(reason);
                Ok(None)
            }
            GateDecision::Allow { .. } => self.load(slot).await.map(Some),
        }
    }

    /// User-initiated load: the explicit "View" action.
    ///
    /// Bypasses the gate entirely. Offered while unloaded and as a retry
    /// after failure; a slot that already holds its payload is a no-op.
    ///
    /// # Errors
    /// Returns the load error on failure; the slot is left failed.
    pub async fn view(&self, slot: &mut AttachmentSlot) -> Result<LoadedAttachment, LoadError> {
        if let LoadStatus::Loaded(attachment) = slot.status() {
            return Ok(LoadedAttachment {
                key: slot.key(),
                attachment: attachment.clone(),
                source: LoadSource::MemoryCache,
            });
        }
        self.load(slot).await
    }

    /// Loads the attachment for a slot, cheapest tier first.
    ///
    /// A cache hit completes the slot immediately without invoking the
    /// codec. Concurrent loads of the same URL share one codec call; late
    /// arrivals wait and are then served from cache.
    ///
    /// # Errors
    /// Returns the codec or cache error; the slot is left failed.
    pub async fn load(&self, slot: &mut AttachmentSlot) -> Result<LoadedAttachment, LoadError> {
        let key = slot.key();

        if let Some(loaded) = self.lookup_cached(&key).await {
            slot.complete(loaded.attachment.clone());
            debug!(key = %key, source = %loaded.source, "Cache hit");
            return Ok(loaded);
        }

        slot.begin_loading();

        // One codec call per key; everyone else waits for it to finish and
        // re-reads the cache.
        loop {
            let notified = self.pending_done.notified();
            {
                let mut pending = self.pending.lock().await;
                if pending.insert(key.clone()) {
                    break;
                }
            }
            debug!(key = %key, "Waiting for in-flight load");
            notified.await;

            if let Some(loaded) = self.lookup_cached(&key).await {
                slot.complete(loaded.attachment.clone());
                return Ok(loaded);
            }
        }

        debug!(key = %key, url = %slot.descriptor().url, "Loading through codec");
        let result = self.codec.load(slot.descriptor()).await;

        {
            let mut pending = self.pending.lock().await;
            pending.remove(&key);
        }
        self.pending_done.notify_waiters();

        match result {
            Ok(attachment) => {
                let attachment = Arc::new(attachment);
                self.write_through(&key, slot, &attachment).await;
                slot.complete(attachment.clone());
                info!(key = %key, size = attachment.len(), "Attachment loaded");
                Ok(LoadedAttachment {
                    key,
                    attachment,
                    source: LoadSource::Codec,
                })
            }
            Err(error) => {
                warn!(key = %key, error = %error, "Attachment load failed");
                slot.fail(error.to_string());
                Err(error)
            }
        }
    }

    /// Checks memory then the durable store; disk hits are promoted.
    async fn lookup_cached(&self, key: &AttachmentKey) -> Option<LoadedAttachment> {
        if let Some(attachment) = self.memory.get(key).await {
            return Some(LoadedAttachment {
                key: key.clone(),
                attachment,
                source: LoadSource::MemoryCache,
            });
        }

        if let Some(attachment) = self.store.get(key).await {
            self.memory.put(key.clone(), attachment.clone()).await;
            return Some(LoadedAttachment {
                key: key.clone(),
                attachment,
                source: LoadSource::DiskCache,
            });
        }

        None
    }

    /// Idempotent write-through after a codec load: durable store, memory
    /// cache, and the session loaded-URL set.
    async fn write_through(
        &self,
        key: &AttachmentKey,
        slot: &AttachmentSlot,
        attachment: &Arc<Attachment>,
    ) {
        if let Err(error) = self.store.put(key, attachment.as_ref()).await {
            warn!(key = %key, error = %error, "Failed to persist attachment");
        }
        self.memory.put(key.clone(), attachment.clone()).await;
        self.session.insert(&slot.descriptor().url);
    }
}

impl std::fmt::Debug for AttachmentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentLoader")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
