//! Port definitions for external collaborators.

mod attachment_cache_port;
mod attachment_codec_port;
mod attachment_store_port;
mod collection_port;

pub use attachment_cache_port::AttachmentCachePort;
pub use attachment_codec_port::AttachmentCodecPort;
pub use attachment_store_port::AttachmentStorePort;
pub use collection_port::CollectionPort;
