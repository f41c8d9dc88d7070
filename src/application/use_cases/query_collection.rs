//! Cached, deduplicated collection metadata querying.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::application::dto::{CollectionQuery, CollectionSnapshot};
use crate::domain::entities::{Collection, CollectionSlug};
use crate::domain::errors::CollectionError;
use crate::domain::ports::CollectionPort;

/// Fetches collection metadata with per-slug result caching and in-flight
/// request sharing. Successful results are cached for the lifetime of the
/// service; failures are not cached, so a later query retries.
pub struct CollectionQueryService {
    port: Arc<dyn CollectionPort>,
    cache: RwLock<HashMap<CollectionSlug, Arc<Collection>>>,
    errors: RwLock<HashMap<CollectionSlug, CollectionError>>,
    loading: RwLock<HashSet<CollectionSlug>>,
    locks: Mutex<HashMap<CollectionSlug, Arc<Mutex<()>>>>,
}

impl CollectionQueryService {
    /// Creates a new service over a marketplace port.
    #[must_use]
    pub fn new(port: Arc<dyn CollectionPort>) -> Self {
        Self {
            port,
            cache: RwLock::new(HashMap::new()),
            errors: RwLock::new(HashMap::new()),
            loading: RwLock::new(HashSet::new()),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Executes a query, honoring its `enabled` flag.
    pub async fn execute(&self, query: CollectionQuery) -> CollectionSnapshot {
        if !query.enabled {
            debug!(slug = %query.slug, "Query disabled, skipping fetch");
            return CollectionSnapshot::Disabled;
        }

        match self.get(&query.slug).await {
            Ok(collection) => CollectionSnapshot::Ready(collection),
            Err(error) => CollectionSnapshot::Failed(error),
        }
    }

    /// Fetches metadata for a slug, serving from cache when possible.
    ///
    /// Concurrent callers for the same slug share a single outbound request:
    /// the first performs the fetch while the rest wait and read its cached
    /// result.
    ///
    /// # Errors
    /// Returns the marketplace error; nothing is cached on failure.
    pub async fn get(&self, slug: &CollectionSlug) -> Result<Arc<Collection>, CollectionError> {
        if let Some(collection) = self.cache.read().await.get(slug) {
            debug!(slug = %slug, "Collection cache hit");
            return Ok(collection.clone());
        }

        let gate = {
            let mut locks = self.locks.lock().await;
            locks.entry(slug.clone()).or_default().clone()
        };
        let _guard = gate.lock().await;

        // Another caller may have completed the fetch while we waited.
        if let Some(collection) = self.cache.read().await.get(slug) {
            debug!(slug = %slug, "Shared in-flight fetch result");
            return Ok(collection.clone());
        }

        self.loading.write().await.insert(slug.clone());
        debug!(slug = %slug, "Fetching collection");
        let result = self.port.fetch_collection(slug).await;
        self.loading.write().await.remove(slug);

        match result {
            Ok(collection) => {
                let collection = Arc::new(collection);
                self.cache
                    .write()
                    .await
                    .insert(slug.clone(), collection.clone());
                self.errors.write().await.remove(slug);
                Ok(collection)
            }
            Err(error) => {
                warn!(slug = %slug, error = %error, "Collection fetch failed");
                self.errors.write().await.insert(slug.clone(), error.clone());
                Err(error)
            }
        }
    }

    /// Non-blocking observation of a slug's query state.
    pub async fn snapshot(&self, slug: &CollectionSlug) -> CollectionSnapshot {
        if let Some(collection) = self.cache.read().await.get(slug) {
            return CollectionSnapshot::Ready(collection.clone());
        }
        if self.loading.read().await.contains(slug) {
            return CollectionSnapshot::Loading;
        }
        if let Some(error) = self.errors.read().await.get(slug) {
            return CollectionSnapshot::Failed(error.clone());
        }
        CollectionSnapshot::Idle
    }
}

impl std::fmt::Debug for CollectionQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionQueryService")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::ports::mocks::MockCollectionPort;

    fn slug() -> CollectionSlug {
        CollectionSlug::parse("boredapeyachtclub").unwrap()
    }

    #[tokio::test]
    async fn test_disabled_query_issues_no_request() {
        let port = Arc::new(MockCollectionPort::succeeding("boredapeyachtclub"));
        let service = CollectionQueryService::new(port.clone());

        let snapshot = service.execute(CollectionQuery::new(slug()).disabled()).await;

        assert!(matches!(snapshot, CollectionSnapshot::Disabled));
        assert_eq!(port.call_count(), 0);
    }

    #[tokio::test]
    async fn test_result_cached_per_slug() {
        let port = Arc::new(MockCollectionPort::succeeding("boredapeyachtclub"));
        let service = CollectionQueryService::new(port.clone());

        let first = service.get(&slug()).await.unwrap();
        let second = service.get(&slug()).await.unwrap();

        assert_eq!(first.name, "boredapeyachtclub");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(port.call_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_queries_share_one_request() {
        let port = Arc::new(
            MockCollectionPort::succeeding("boredapeyachtclub")
                .with_delay(Duration::from_millis(20)),
        );
        let service = CollectionQueryService::new(port.clone());

        let slug_a = slug();
        let slug_b = slug();
        let (a, b) = tokio::join!(service.get(&slug_a), service.get(&slug_b));
        a.unwrap();
        b.unwrap();

        assert_eq!(port.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_not_cached() {
        let port = Arc::new(MockCollectionPort::failing(CollectionError::network(
            "connection reset",
        )));
        let service = CollectionQueryService::new(port.clone());

        let snapshot = service.execute(CollectionQuery::new(slug())).await;
        assert!(matches!(snapshot, CollectionSnapshot::Failed(_)));
        assert!(matches!(
            service.snapshot(&slug()).await,
            CollectionSnapshot::Failed(_)
        ));

        // The next query retries and succeeds.
        port.set_response(Ok(crate::domain::entities::Collection {
            slug: slug(),
            name: "Bored Ape Yacht Club".to_string(),
            description: None,
            image_url: None,
            external_url: None,
            created_date: None,
            stats: crate::domain::entities::CollectionStats::default(),
        }));

        let collection = service.get(&slug()).await.unwrap();
        assert_eq!(collection.name, "Bored Ape Yacht Club");
        assert_eq!(port.call_count(), 2);
        assert!(matches!(
            service.snapshot(&slug()).await,
            CollectionSnapshot::Ready(_)
        ));
    }

    #[tokio::test]
    async fn test_snapshot_idle_for_unknown_slug() {
        let port = Arc::new(MockCollectionPort::succeeding("boredapeyachtclub"));
        let service = CollectionQueryService::new(port);

        let other = CollectionSlug::parse("azuki").unwrap();
        assert!(matches!(
            service.snapshot(&other).await,
            CollectionSnapshot::Idle
        ));
    }
}
