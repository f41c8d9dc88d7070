//! Collection fetch error types.

use thiserror::Error;

/// Errors that can occur while fetching collection metadata.
#[derive(Debug, Clone, Error)]
pub enum CollectionError {
    /// The slug failed validation before any request was made.
    #[error("invalid collection slug: {reason}")]
    InvalidSlug {
        /// Why validation failed.
        reason: String,
    },

    /// The marketplace does not know this collection.
    #[error("collection not found: {slug}")]
    NotFound {
        /// The slug that was looked up.
        slug: String,
    },

    /// The API key was missing or rejected.
    #[error("marketplace rejected the API key")]
    Unauthorized,

    /// The marketplace throttled the request.
    #[error("rate limited by marketplace, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Suggested backoff before retrying.
        retry_after_ms: u64,
    },

    /// Transport-level failure.
    #[error("network error: {message}")]
    Network {
        /// Description of the failure.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to parse marketplace response: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },

    /// Anything else.
    #[error("unexpected marketplace error: {message}")]
    Unexpected {
        /// Description of the failure.
        message: String,
    },
}

impl CollectionError {
    /// Creates an invalid-slug error.
    #[must_use]
    pub fn invalid_slug(reason: impl Into<String>) -> Self {
        Self::InvalidSlug {
            reason: reason.into(),
        }
    }

    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound { slug: slug.into() }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether a retry could succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::RateLimited { .. } | Self::Unexpected { .. }
        )
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::RateLimited { .. })
    }
}
