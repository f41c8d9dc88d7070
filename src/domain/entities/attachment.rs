//! Attachment descriptor and decoded payload types.

use std::sync::Arc;

use bytes::Bytes;

/// Unique identifier for a cached attachment.
/// Generated from a hash of the remote attachment URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttachmentKey(pub String);

impl AttachmentKey {
    /// Creates a new `AttachmentKey` from any string-like input.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Creates an `AttachmentKey` from a URL by hashing it.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let result = hasher.finalize();
        Self(hex::encode(&result[..16]))
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AttachmentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Descriptor of externally hosted encrypted media referenced by a message.
///
/// The payload itself lives behind the codec port; only the URL (cache key)
/// and the declared content length (size gating) are consumed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAttachment {
    /// Location of the hosted payload. Doubles as the cache key.
    pub url: String,
    /// Original filename as declared by the sender.
    pub filename: String,
    /// Declared media type, if the sender provided one.
    pub content_type: Option<String>,
    /// Declared payload size in bytes.
    pub content_length: u64,
}

impl RemoteAttachment {
    /// Creates a new descriptor.
    #[must_use]
    pub fn new(url: impl Into<String>, filename: impl Into<String>, content_length: u64) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            content_type: None,
            content_length,
        }
    }

    /// Sets the declared content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the cache key for this descriptor.
    #[must_use]
    pub fn key(&self) -> AttachmentKey {
        AttachmentKey::from_url(&self.url)
    }
}

/// Decoded attachment payload, passed through opaquely to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Filename for display and export.
    pub filename: String,
    /// Media type of the decoded payload.
    pub mime_type: String,
    /// Decoded payload bytes.
    pub data: Bytes,
}

impl Attachment {
    /// Creates a new decoded attachment.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Returns the payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if this appears to be an image based on media type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Where an attachment load was satisfied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Served from the in-memory LRU cache.
    MemoryCache,
    /// Served from the durable on-disk store.
    DiskCache,
    /// Fetched and decoded through the messaging codec.
    Codec,
}

impl std::fmt::Display for LoadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemoryCache => write!(f, "memory"),
            Self::DiskCache => write!(f, "disk"),
            Self::Codec => write!(f, "codec"),
        }
    }
}

/// A successfully loaded attachment with provenance.
#[derive(Debug, Clone)]
pub struct LoadedAttachment {
    /// Cache key the load was keyed by.
    pub key: AttachmentKey,
    /// The decoded payload.
    pub attachment: Arc<Attachment>,
    /// Which tier satisfied the load.
    pub source: LoadSource,
}
