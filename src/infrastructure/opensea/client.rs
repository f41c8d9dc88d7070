//! OpenSea API HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::dto::{CollectionEnvelope, ErrorBody};
use crate::domain::entities::{Collection, CollectionSlug};
use crate::domain::errors::CollectionError;
use crate::domain::ports::CollectionPort;

/// Base URL of the OpenSea v1 API.
pub const DEFAULT_API_BASE: &str = "https://api.opensea.io/api/v1";

const API_KEY_HEADER: &str = "X-API-KEY";
const USER_AGENT: &str = concat!("mediagate/", env!("CARGO_PKG_VERSION"));

/// OpenSea collection metadata client.
pub struct OpenSeaClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenSeaClient {
    /// Creates a new client against the production API.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Result<Self, CollectionError> {
        Self::with_base_url(DEFAULT_API_BASE, api_key, timeout_secs)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, CollectionError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                CollectionError::unexpected(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    async fn handle_error_response(
        slug: &CollectionSlug,
        status: StatusCode,
        response: reqwest::Response,
    ) -> CollectionError {
        let detail = match response.json::<ErrorBody>().await {
            Ok(body) => body.detail.unwrap_or_else(|| format!("HTTP {status}")),
            Err(_) => format!("HTTP {status}"),
        };

        match status {
            StatusCode::NOT_FOUND => CollectionError::not_found(slug.as_str()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CollectionError::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => CollectionError::RateLimited {
                retry_after_ms: 5000,
            },
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                CollectionError::network("marketplace is temporarily unavailable")
            }
            _ => CollectionError::unexpected(format!("unexpected response: {status} - {detail}")),
        }
    }
}

#[async_trait]
impl CollectionPort for OpenSeaClient {
    async fn fetch_collection(&self, slug: &CollectionSlug) -> Result<Collection, CollectionError> {
        let url = format!("{}/collection/{}", self.base_url, slug);

        debug!(slug = %slug, "Fetching collection from OpenSea");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                warn!(slug = %slug, error = %e, "Failed to reach OpenSea");
                if e.is_timeout() {
                    CollectionError::network("request timed out")
                } else if e.is_connect() {
                    CollectionError::network("failed to connect to OpenSea")
                } else {
                    CollectionError::network(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            return Err(Self::handle_error_response(slug, status, response).await);
        }

        let envelope: CollectionEnvelope = response.json().await.map_err(|e| {
            warn!(slug = %slug, error = %e, "Failed to parse collection response");
            CollectionError::parse(e.to_string())
        })?;

        let collection = envelope.collection.into_domain(slug);

        debug!(
            slug = %slug,
            name = %collection.name,
            "Collection fetched"
        );

        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenSeaClient::new("test-key", 30);
        assert!(client.is_ok());
    }

    #[test]
    fn test_custom_base_url() {
        let client = OpenSeaClient::with_base_url("http://localhost:1", "k", 1).unwrap();
        assert_eq!(client.base_url, "http://localhost:1");
    }
}
