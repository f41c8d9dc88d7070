//! Mediagate - attachment gating and caching for a decentralized social client.
//!
//! This crate decides whether remote message attachments should auto-load,
//! performs the load through an external codec seam, and persists results in
//! a layered cache. It also provides a cached, deduplicated client for NFT
//! collection metadata.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, services, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "mediagate";
