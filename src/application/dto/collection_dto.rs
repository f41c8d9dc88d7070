//! Collection query request and result views.

use std::sync::Arc;

use crate::domain::entities::{Collection, CollectionSlug};
use crate::domain::errors::CollectionError;

/// A request for collection metadata.
#[derive(Debug, Clone)]
pub struct CollectionQuery {
    /// Which collection to fetch.
    pub slug: CollectionSlug,
    /// When false, no request is issued at all.
    pub enabled: bool,
}

impl CollectionQuery {
    /// Creates an enabled query.
    #[must_use]
    pub const fn new(slug: CollectionSlug) -> Self {
        Self {
            slug,
            enabled: true,
        }
    }

    /// Disables the query.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Observable state of a collection query.
#[derive(Debug, Clone)]
pub enum CollectionSnapshot {
    /// The query was disabled; nothing was fetched.
    Disabled,
    /// No fetch has been attempted for this slug.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Metadata is available.
    Ready(Arc<Collection>),
    /// The last fetch failed. Not cached; a later query retries.
    Failed(CollectionError),
}

impl CollectionSnapshot {
    /// Returns the collection if available.
    #[must_use]
    pub fn collection(&self) -> Option<&Arc<Collection>> {
        match self {
            Self::Ready(collection) => Some(collection),
            _ => None,
        }
    }

    /// Returns true if a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the error if the last fetch failed.
    #[must_use]
    pub const fn error(&self) -> Option<&CollectionError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}
