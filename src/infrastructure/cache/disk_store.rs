//! Durable on-disk attachment store.
//!
//! Each entry is a `<key>.bin` payload file plus a `<key>.json` metadata
//! sidecar. Entries survive process restarts; a byte budget is enforced by
//! removing the least recently accessed entries.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace, warn};

use crate::domain::entities::{Attachment, AttachmentKey};
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::AttachmentStorePort;

/// Maximum store size in bytes (512 MB default).
pub const DEFAULT_MAX_STORE_SIZE: u64 = 512 * 1024 * 1024;

/// Metadata sidecar persisted next to each payload file.
#[derive(Debug, Serialize, Deserialize)]
struct StoredMeta {
    filename: String,
    mime_type: String,
    stored_at: DateTime<Utc>,
}

/// Disk-backed attachment store that persists decoded payloads.
pub struct DiskAttachmentStore {
    store_dir: PathBuf,
    max_size: u64,
    current_size: AtomicU64,
    item_count: AtomicUsize,
}

impl DiskAttachmentStore {
    /// Creates a new store in the specified directory.
    ///
    /// # Errors
    /// Returns error if the store directory cannot be created or read.
    pub async fn new(store_dir: PathBuf, max_size: u64) -> CacheResult<Self> {
        fs::create_dir_all(&store_dir)
            .await
            .map_err(|e| CacheError::Io(format!("failed to create store dir: {e}")))?;

        let mut total_size = 0u64;
        let mut count = 0usize;

        let mut entries = fs::read_dir(&store_dir)
            .await
            .map_err(|e| CacheError::Io(format!("failed to read store dir: {e}")))?;

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "bin")
                && let Ok(meta) = entry.metadata().await
            {
                total_size += meta.len();
                count += 1;
            }
        }

        let store = Self {
            store_dir,
            max_size,
            current_size: AtomicU64::new(total_size),
            item_count: AtomicUsize::new(count),
        };

        store.cleanup_if_needed().await;

        Ok(store)
    }

    /// Creates a store in the default location under the user cache dir.
    ///
    /// # Errors
    /// Returns error if the store directory cannot be created.
    pub async fn default_location() -> CacheResult<Self> {
        Self::new(default_store_path(), DEFAULT_MAX_STORE_SIZE).await
    }

    fn payload_path(&self, key: &AttachmentKey) -> PathBuf {
        self.store_dir.join(format!("{}.bin", key.as_str()))
    }

    fn meta_path(&self, key: &AttachmentKey) -> PathBuf {
        self.store_dir.join(format!("{}.json", key.as_str()))
    }

    /// Returns the current store size in bytes.
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size.load(Ordering::Relaxed)
    }

    /// Removes the least recently accessed entries if over budget.
    async fn cleanup_if_needed(&self) {
        let current_size = self.current_size();
        if current_size <= self.max_size {
            return;
        }

        debug!(
            current_size = current_size,
            max_size = self.max_size,
            "Attachment store over limit, cleaning up"
        );

        let Ok(mut entries) = fs::read_dir(&self.store_dir).await else {
            return;
        };

        let mut files: Vec<(PathBuf, std::time::SystemTime, u64)> = Vec::new();

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "bin") {
                continue;
            }

            if let Ok(meta) = entry.metadata().await {
                let accessed = meta.accessed().unwrap_or(std::time::SystemTime::UNIX_EPOCH);
                files.push((path, accessed, meta.len()));
            }
        }

        files.sort_by_key(|(_, time, _)| *time);

        let mut freed_size = 0u64;
        let mut freed_count = 0usize;
        let target = current_size - self.max_size + (self.max_size / 10);

        for (path, _, size) in files {
            if freed_size >= target {
                break;
            }

            let sidecar = path.with_extension("json");
            if let Err(e) = fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "Failed to remove old store entry");
            } else {
                let _ = fs::remove_file(&sidecar).await;
                freed_size += size;
                freed_count += 1;
            }
        }
        self.current_size.fetch_sub(freed_size, Ordering::Relaxed);
        self.item_count.fetch_sub(freed_count, Ordering::Relaxed);

        debug!(
            freed_size = freed_size,
            freed_count = freed_count,
            "Attachment store cleanup complete"
        );
    }
}

#[async_trait]
impl AttachmentStorePort for DiskAttachmentStore {
    async fn get(&self, key: &AttachmentKey) -> Option<Arc<Attachment>> {
        let meta_bytes = match fs::read(self.meta_path(key)).await {
            Ok(bytes) => bytes,
            Err(_) => {
                trace!(key = %key, "Store miss");
                return None;
            }
        };

        let meta: StoredMeta = match serde_json::from_slice(&meta_bytes) {
            Ok(meta) => meta,
            Err(e) => {
                warn!(key = %key, error = %e, "Corrupt metadata sidecar");
                return None;
            }
        };

        match fs::read(self.payload_path(key)).await {
            Ok(bytes) => {
                trace!(key = %key, "Store hit");
                Some(Arc::new(Attachment::new(
                    meta.filename,
                    meta.mime_type,
                    bytes,
                )))
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Metadata present but payload unreadable");
                None
            }
        }
    }

    async fn put(&self, key: &AttachmentKey, attachment: &Attachment) -> CacheResult<()> {
        let payload_path = self.payload_path(key);

        let old_size = fs::metadata(&payload_path).await.map(|m| m.len()).ok();

        let mut file = fs::File::create(&payload_path)
            .await
            .map_err(|e| CacheError::Io(format!("failed to create payload file: {e}")))?;
        file.write_all(&attachment.data)
            .await
            .map_err(|e| CacheError::Io(format!("failed to write payload file: {e}")))?;
        file.flush()
            .await
            .map_err(|e| CacheError::Io(format!("failed to flush payload file: {e}")))?;

        let meta = StoredMeta {
            filename: attachment.filename.clone(),
            mime_type: attachment.mime_type.clone(),
            stored_at: Utc::now(),
        };
        let meta_bytes = serde_json::to_vec(&meta)
            .map_err(|e| CacheError::Corrupt(format!("failed to encode metadata: {e}")))?;
        fs::write(self.meta_path(key), meta_bytes)
            .await
            .map_err(|e| CacheError::Io(format!("failed to write metadata sidecar: {e}")))?;

        let new_size = attachment.data.len() as u64;
        if let Some(old) = old_size {
            if new_size > old {
                self.current_size
                    .fetch_add(new_size - old, Ordering::Relaxed);
            } else {
                self.current_size
                    .fetch_sub(old - new_size, Ordering::Relaxed);
            }
        } else {
            self.current_size.fetch_add(new_size, Ordering::Relaxed);
            self.item_count.fetch_add(1, Ordering::Relaxed);
        }

        debug!(key = %key, size = attachment.data.len(), "Stored attachment");

        self.cleanup_if_needed().await;

        Ok(())
    }

    async fn contains(&self, key: &AttachmentKey) -> bool {
        fs::try_exists(self.payload_path(key)).await.unwrap_or(false)
    }

    async fn remove(&self, key: &AttachmentKey) {
        let payload_path = self.payload_path(key);
        let size = fs::metadata(&payload_path).await.map(|m| m.len()).ok();
        if let Err(e) = fs::remove_file(&payload_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(key = %key, error = %e, "Failed to remove store entry");
            }
        } else if let Some(s) = size {
            let _ = fs::remove_file(self.meta_path(key)).await;
            self.current_size.fetch_sub(s, Ordering::Relaxed);
            self.item_count.fetch_sub(1, Ordering::Relaxed);
            debug!(key = %key, "Removed store entry");
        }
    }

    async fn len(&self) -> usize {
        self.item_count.load(Ordering::Relaxed)
    }

    async fn clear(&self) -> CacheResult<()> {
        let mut entries = fs::read_dir(&self.store_dir)
            .await
            .map_err(|e| CacheError::Io(format!("failed to read store dir: {e}")))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CacheError::Io(format!("failed to read entry: {e}")))?
        {
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "bin" || ext == "json")
                && fs::remove_file(&path).await.is_err()
            {
                warn!(path = %path.display(), "Failed to remove store file");
            }
        }
        self.current_size.store(0, Ordering::Relaxed);
        self.item_count.store(0, Ordering::Relaxed);
        debug!("Cleared attachment store");
        Ok(())
    }
}

/// Returns the default store directory path.
fn default_store_path() -> PathBuf {
    directories::ProjectDirs::from("com", "tecknian", "mediagate").map_or_else(
        || {
            std::env::temp_dir()
                .join("mediagate")
                .join("cache")
                .join("attachments")
        },
        |dirs| dirs.cache_dir().join("attachments"),
    )
}
