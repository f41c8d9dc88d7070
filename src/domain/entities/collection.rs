//! Marketplace collection metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::CollectionError;

/// Validated marketplace collection slug.
///
/// Slugs are non-empty and limited to lowercase alphanumerics, `-`, and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionSlug(String);

impl CollectionSlug {
    /// Parses and validates a slug.
    ///
    /// # Errors
    /// Returns `CollectionError::InvalidSlug` if the input is empty or
    /// contains characters outside the slug alphabet.
    pub fn parse(slug: impl Into<String>) -> Result<Self, CollectionError> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(CollectionError::invalid_slug("slug is empty"));
        }
        if !slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(CollectionError::invalid_slug(format!(
                "slug contains invalid characters: {slug}"
            )));
        }
        Ok(Self(slug))
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Aggregate statistics for a collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionStats {
    /// Number of items in the collection.
    pub total_supply: f64,
    /// Number of distinct owners.
    pub num_owners: u64,
    /// Current floor price in the marketplace's native unit, if listed.
    pub floor_price: Option<f64>,
    /// All-time traded volume.
    pub total_volume: f64,
}

/// Marketplace metadata describing an NFT collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Slug identifying the collection.
    pub slug: CollectionSlug,
    /// Display name.
    pub name: String,
    /// Long-form description, if provided.
    pub description: Option<String>,
    /// Cover image URL.
    pub image_url: Option<String>,
    /// Project website.
    pub external_url: Option<String>,
    /// When the collection was created on the marketplace.
    pub created_date: Option<DateTime<Utc>>,
    /// Aggregate statistics.
    pub stats: CollectionStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        for slug in ["boredapeyachtclub", "azuki-official", "proof_moonbirds", "0xabc"] {
            assert!(CollectionSlug::parse(slug).is_ok(), "rejected {slug}");
        }
    }

    #[test]
    fn test_invalid_slugs() {
        for slug in ["", "Bored Apes", "UPPER", "slash/slug", "emoji🦍"] {
            assert!(
                matches!(
                    CollectionSlug::parse(slug),
                    Err(CollectionError::InvalidSlug { .. })
                ),
                "accepted {slug}"
            );
        }
    }

    #[test]
    fn test_slug_display_roundtrip() {
        let slug = CollectionSlug::parse("boredapeyachtclub").unwrap();
        assert_eq!(slug.to_string(), "boredapeyachtclub");
        assert_eq!(slug.as_str(), "boredapeyachtclub");
    }
}
