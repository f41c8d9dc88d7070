//! Port definition for the NFT marketplace API.

use async_trait::async_trait;

use crate::domain::entities::{Collection, CollectionSlug};
use crate::domain::errors::CollectionError;

/// Port for fetching collection metadata from the marketplace.
#[async_trait]
pub trait CollectionPort: Send + Sync {
    /// Fetches metadata for one collection.
    async fn fetch_collection(&self, slug: &CollectionSlug) -> Result<Collection, CollectionError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::RwLock;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::domain::entities::CollectionStats;

    /// Mock marketplace port with a programmable outcome and call counter.
    pub struct MockCollectionPort {
        response: RwLock<Result<Collection, CollectionError>>,
        calls: AtomicUsize,
        delay: Option<Duration>,
    }

    impl MockCollectionPort {
        /// Creates a port returning a minimal collection for the given slug.
        pub fn succeeding(slug: &str) -> Self {
            let collection = Collection {
                slug: CollectionSlug::parse(slug).unwrap(),
                name: slug.to_string(),
                description: None,
                image_url: None,
                external_url: None,
                created_date: None,
                stats: CollectionStats::default(),
            };
            Self {
                response: RwLock::new(Ok(collection)),
                calls: AtomicUsize::new(0),
                delay: None,
            }
        }

        /// Creates a port that fails with the given error.
        pub fn failing(error: CollectionError) -> Self {
            Self {
                response: RwLock::new(Err(error)),
                calls: AtomicUsize::new(0),
                delay: None,
            }
        }

        /// Adds an artificial delay before each response.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Replaces the programmed outcome.
        pub fn set_response(&self, response: Result<Collection, CollectionError>) {
            *self.response.write().unwrap() = response;
        }

        /// Returns how many fetches reached the port.
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CollectionPort for MockCollectionPort {
        async fn fetch_collection(
            &self,
            _slug: &CollectionSlug,
        ) -> Result<Collection, CollectionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.response.read().unwrap().clone()
        }
    }
}
