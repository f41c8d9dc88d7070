//! Per-attachment load state for message rendering.

use std::sync::Arc;

use bytes::Bytes;

use crate::domain::entities::{Attachment, AttachmentKey, RemoteAttachment, SenderContext};
use crate::domain::services::BlockReason;

/// Status of an attachment in the loading pipeline.
///
/// Transitions: `Unloaded -> Loading -> Loaded | Failed`, and
/// `Failed -> Loading` on retry. `Loaded` is terminal; there is no way back
/// to `Unloaded`. Cache hits complete without an observable `Loading` phase.
#[derive(Debug, Clone, Default)]
pub enum LoadStatus {
    /// Loading has not started; the gate may have blocked it.
    #[default]
    Unloaded,
    /// The codec load is in flight.
    Loading,
    /// The decoded payload is available.
    Loaded(Arc<Attachment>),
    /// The load failed; a retry is available.
    Failed(String),
}

impl LoadStatus {
    /// Returns true if the payload is available.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Returns true if a load is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if the load failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns true if loading has not started.
    #[must_use]
    pub const fn is_unloaded(&self) -> bool {
        matches!(self, Self::Unloaded)
    }
}

/// A locally generated preview shown before remote data is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPreview {
    /// Media type of the preview bytes.
    pub mime_type: String,
    /// Preview payload.
    pub data: Bytes,
}

impl LocalPreview {
    /// Creates a new local preview.
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// What a renderer should display for a slot.
#[derive(Debug, Clone)]
pub enum RenderState {
    /// Show the supplied local preview. Always wins over every other state
    /// so the view never flickers when remote data supersedes it.
    Preview(Arc<LocalPreview>),
    /// Show the decoded attachment.
    Content(Arc<Attachment>),
    /// Show a loading indicator.
    Loading,
    /// Show the block reason (if any) and a "View" affordance.
    Unloaded {
        /// Why the gate declined to auto-load, if it did.
        reason: Option<BlockReason>,
    },
    /// Show the error and a retry affordance.
    Failed {
        /// Human-readable failure description.
        error: String,
    },
}

/// Tracks one remote attachment through the gate and load pipeline.
#[derive(Debug, Clone)]
pub struct AttachmentSlot {
    descriptor: RemoteAttachment,
    sender: SenderContext,
    status: LoadStatus,
    block_reason: Option<BlockReason>,
    preview: Option<Arc<LocalPreview>>,
}

impl AttachmentSlot {
    /// Creates a slot in the unloaded state.
    #[must_use]
    pub fn new(descriptor: RemoteAttachment, sender: SenderContext) -> Self {
        Self {
            descriptor,
            sender,
            status: LoadStatus::Unloaded,
            block_reason: None,
            preview: None,
        }
    }

    /// Attaches a locally generated preview.
    #[must_use]
    pub fn with_preview(mut self, preview: LocalPreview) -> Self {
        self.preview = Some(Arc::new(preview));
        self
    }

    /// Returns the remote descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &RemoteAttachment {
        &self.descriptor
    }

    /// Returns the sender context.
    #[must_use]
    pub fn sender(&self) -> &SenderContext {
        &self.sender
    }

    /// Returns the cache key for this slot's descriptor.
    #[must_use]
    pub fn key(&self) -> AttachmentKey {
        self.descriptor.key()
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Records a gate block. Only meaningful while unloaded.
    pub fn block(&mut self, reason: BlockReason) {
        if self.status.is_unloaded() {
            self.block_reason = Some(reason);
        }
    }

    /// Marks the load in flight. Legal from `Unloaded` and `Failed` (retry).
    pub fn begin_loading(&mut self) {
        match self.status {
            LoadStatus::Unloaded | LoadStatus::Failed(_) => {
                self.status = LoadStatus::Loading;
            }
            LoadStatus::Loading | LoadStatus::Loaded(_) => {}
        }
    }

    /// Completes the load with a decoded payload.
    ///
    /// Legal from any state except `Loaded`; a cache hit completes straight
    /// from `Unloaded`.
    pub fn complete(&mut self, attachment: Arc<Attachment>) {
        if !self.status.is_loaded() {
            self.status = LoadStatus::Loaded(attachment);
            self.block_reason = None;
        }
    }

    /// Records a failed load with a retry affordance.
    pub fn fail(&mut self, error: impl Into<String>) {
        if !self.status.is_loaded() {
            self.status = LoadStatus::Failed(error.into());
        }
    }

    /// Returns true if the explicit "View" action is available.
    /// Offered while unloaded, and as a retry after failure.
    #[must_use]
    pub const fn can_view(&self) -> bool {
        matches!(self.status, LoadStatus::Unloaded | LoadStatus::Failed(_))
    }

    /// Computes what a renderer should display.
    #[must_use]
    pub fn render_state(&self) -> RenderState {
        if let Some(preview) = &self.preview {
            return RenderState::Preview(preview.clone());
        }

        match &self.status {
            LoadStatus::Loaded(attachment) => RenderState::Content(attachment.clone()),
            LoadStatus::Loading => RenderState::Loading,
            LoadStatus::Failed(error) => RenderState::Failed {
                error: error.clone(),
            },
            LoadStatus::Unloaded => RenderState::Unloaded {
                reason: self.block_reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_slot() -> AttachmentSlot {
        AttachmentSlot::new(
            RemoteAttachment::new("https://example.com/a.png", "a.png", 42),
            SenderContext::received(Some(true)),
        )
    }

    #[test]
    fn test_loading_flow() {
        let mut slot = make_slot();
        assert!(slot.status().is_unloaded());
        assert!(slot.can_view());

        slot.begin_loading();
        assert!(slot.status().is_loading());
        assert!(!slot.can_view());

        slot.complete(Arc::new(Attachment::new("a.png", "image/png", vec![1])));
        assert!(slot.status().is_loaded());
        assert!(!slot.can_view());
    }

    #[test]
    fn test_failure_and_retry() {
        let mut slot = make_slot();
        slot.begin_loading();
        slot.fail("codec error");
        assert!(slot.status().is_failed());
        assert!(slot.can_view());

        slot.begin_loading();
        assert!(slot.status().is_loading());
    }

    #[test]
    fn test_loaded_is_terminal() {
        let mut slot = make_slot();
        let payload = Arc::new(Attachment::new("a.png", "image/png", vec![1]));
        slot.complete(payload);

        slot.fail("should be ignored");
        assert!(slot.status().is_loaded());

        slot.begin_loading();
        assert!(slot.status().is_loaded());
    }

    #[test]
    fn test_cache_hit_completes_from_unloaded() {
        let mut slot = make_slot();
        slot.complete(Arc::new(Attachment::new("a.png", "image/png", vec![1])));
        assert!(slot.status().is_loaded());
    }

    #[test]
    fn test_block_reason_rendered_while_unloaded() {
        let mut slot = make_slot();
        slot.block(BlockReason::TooLarge);

        match slot.render_state() {
            RenderState::Unloaded { reason } => assert_eq!(reason, Some(BlockReason::TooLarge)),
            other => panic!("unexpected render state: {other:?}"),
        }
    }

    #[test]
    fn test_preview_wins_over_every_state() {
        let preview = LocalPreview::new("image/jpeg", vec![9, 9]);
        let mut slot = make_slot().with_preview(preview.clone());

        assert!(matches!(slot.render_state(), RenderState::Preview(_)));

        slot.block(BlockReason::NotFollowed);
        assert!(matches!(slot.render_state(), RenderState::Preview(_)));

        slot.begin_loading();
        assert!(matches!(slot.render_state(), RenderState::Preview(_)));

        slot.fail("boom");
        assert!(matches!(slot.render_state(), RenderState::Preview(_)));

        slot.begin_loading();
        slot.complete(Arc::new(Attachment::new("a.png", "image/png", vec![1])));
        match slot.render_state() {
            RenderState::Preview(p) => assert_eq!(*p, preview),
            other => panic!("unexpected render state: {other:?}"),
        }
    }
}
