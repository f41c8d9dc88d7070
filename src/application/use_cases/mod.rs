//! Use case implementations.

mod load_attachment;
mod query_collection;

pub use load_attachment::AttachmentLoader;
pub use query_collection::CollectionQueryService;
