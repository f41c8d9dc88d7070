//! Infrastructure layer: adapters for storage, HTTP, and configuration.

/// Attachment cache adapters.
pub mod cache;
/// Configuration loading and CLI arguments.
pub mod config;
/// OpenSea marketplace client.
pub mod opensea;

pub use cache::{DiskAttachmentStore, MemoryAttachmentCache};
pub use config::{AppConfig, CliArgs, StorageManager};
pub use opensea::OpenSeaClient;
