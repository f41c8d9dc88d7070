//! Domain error types.

mod cache_error;
mod collection_error;
mod load_error;

pub use cache_error::{CacheError, CacheResult};
pub use collection_error::CollectionError;
pub use load_error::LoadError;
