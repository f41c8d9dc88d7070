//! Attachment cache adapters.

mod disk_store;
mod memory_cache;

pub use disk_store::{DEFAULT_MAX_STORE_SIZE, DiskAttachmentStore};
pub use memory_cache::{CacheStats, DEFAULT_CACHE_ENTRIES, MemoryAttachmentCache};
