//! Domain entity definitions.

mod attachment;
mod collection;
mod sender;
mod session_cache;
mod slot;

pub use attachment::{Attachment, AttachmentKey, LoadSource, LoadedAttachment, RemoteAttachment};
pub use collection::{Collection, CollectionSlug, CollectionStats};
pub use sender::SenderContext;
pub use session_cache::SessionUrlSet;
pub use slot::{AttachmentSlot, LoadStatus, LocalPreview, RenderState};
