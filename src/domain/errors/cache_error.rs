//! Cache error types.

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// Attachment not found in cache.
    #[error("attachment not found: {0}")]
    NotFound(String),
    /// Cached entry could not be decoded.
    #[error("corrupt cache entry: {0}")]
    Corrupt(String),
    /// I/O error during cache operation.
    #[error("io error: {0}")]
    Io(String),
}
