//! Attachment load error types.

use thiserror::Error;

use super::CacheError;

/// Errors that can occur while loading a remote attachment.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// No messaging client is available to drive the codec.
    /// Surfaces as a failed slot with a retry affordance rather than a
    /// silently stuck load.
    #[error("messaging client unavailable")]
    ClientUnavailable,

    /// The codec rejected or failed the load.
    #[error("codec load failed: {message}")]
    Codec {
        /// Description from the codec.
        message: String,
    },

    /// A cache tier failed.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

impl LoadError {
    /// Creates a codec error.
    #[must_use]
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /// Returns whether a retry could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ClientUnavailable | Self::Codec { .. })
    }
}
