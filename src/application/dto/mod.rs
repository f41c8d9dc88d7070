//! Data transfer objects.

mod collection_dto;

pub use collection_dto::{CollectionQuery, CollectionSnapshot};
