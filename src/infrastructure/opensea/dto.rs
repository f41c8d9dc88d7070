//! OpenSea API response structures.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::domain::entities::{Collection, CollectionSlug, CollectionStats};

/// Envelope around the collection body.
#[derive(Debug, Deserialize)]
pub struct CollectionEnvelope {
    /// The nested collection object.
    pub collection: CollectionBody,
}

/// OpenSea collection body.
#[derive(Debug, Deserialize)]
pub struct CollectionBody {
    /// Display name.
    pub name: String,
    /// Long-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Cover image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Project website.
    #[serde(default)]
    pub external_url: Option<String>,
    /// Creation timestamp; OpenSea emits a naive ISO-8601 string.
    #[serde(default)]
    pub created_date: Option<String>,
    /// Aggregate statistics.
    #[serde(default)]
    pub stats: Option<StatsBody>,
}

/// OpenSea collection statistics body.
#[derive(Debug, Deserialize, Default)]
pub struct StatsBody {
    /// Number of items in the collection.
    #[serde(default)]
    pub total_supply: f64,
    /// Number of distinct owners.
    #[serde(default)]
    pub num_owners: u64,
    /// Current floor price.
    #[serde(default)]
    pub floor_price: Option<f64>,
    /// All-time traded volume.
    #[serde(default)]
    pub total_volume: f64,
}

/// OpenSea API error body.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Error detail, when provided.
    #[serde(default)]
    pub detail: Option<String>,
}

impl CollectionBody {
    /// Converts the API body into the domain entity.
    #[must_use]
    pub fn into_domain(self, slug: &CollectionSlug) -> Collection {
        let created_date = self.created_date.as_deref().and_then(parse_created_date);
        let stats = self.stats.unwrap_or_default();

        Collection {
            slug: slug.clone(),
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            external_url: self.external_url,
            created_date,
            stats: CollectionStats {
                total_supply: stats.total_supply,
                num_owners: stats.num_owners,
                floor_price: stats.floor_price,
                total_volume: stats.total_volume,
            },
        }
    }
}

/// Parses OpenSea's creation timestamps, which arrive either as RFC 3339 or
/// as a naive datetime without offset.
fn parse_created_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Some(naive.and_utc()),
        Err(e) => {
            warn!(raw = raw, error = %e, "Unparseable created_date");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "collection": {
            "name": "Bored Ape Yacht Club",
            "description": "The Bored Ape Yacht Club is a collection of 10,000 unique Bored Ape NFTs.",
            "image_url": "https://i.seadn.io/gae/bayc.png",
            "external_url": "https://boredapeyachtclub.com",
            "created_date": "2021-04-22T23:14:03.967121",
            "stats": {
                "total_supply": 10000.0,
                "num_owners": 5503,
                "floor_price": 11.8,
                "total_volume": 1432412.7
            }
        }
    }"#;

    #[test]
    fn test_parse_sample_envelope() {
        let envelope: CollectionEnvelope = serde_json::from_str(SAMPLE).unwrap();
        let slug = CollectionSlug::parse("boredapeyachtclub").unwrap();
        let collection = envelope.collection.into_domain(&slug);

        assert_eq!(collection.name, "Bored Ape Yacht Club");
        assert_eq!(collection.slug.as_str(), "boredapeyachtclub");
        assert!(collection.created_date.is_some());
        assert_eq!(collection.stats.num_owners, 5503);
        assert_eq!(collection.stats.floor_price, Some(11.8));
    }

    #[test]
    fn test_missing_stats_defaults() {
        let body: CollectionEnvelope =
            serde_json::from_str(r#"{"collection": {"name": "Minimal"}}"#).unwrap();
        let slug = CollectionSlug::parse("minimal").unwrap();
        let collection = body.collection.into_domain(&slug);

        assert_eq!(collection.name, "Minimal");
        assert!(collection.description.is_none());
        assert!(collection.created_date.is_none());
        assert_eq!(collection.stats.num_owners, 0);
    }

    #[test]
    fn test_created_date_formats() {
        assert!(parse_created_date("2021-04-22T23:14:03.967121").is_some());
        assert!(parse_created_date("2021-04-22T23:14:03Z").is_some());
        assert!(parse_created_date("not a date").is_none());
    }
}
