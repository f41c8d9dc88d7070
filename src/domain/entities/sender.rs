//! Viewer-relative sender identity used by the gate.

/// How the viewer relates to the sender of an attachment.
///
/// `followed_by_me` is `None` when no sender profile could be resolved, in
/// which case the follow-based gate rule does not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SenderContext {
    /// The viewer is the sender of the message.
    pub sent_by_me: bool,
    /// Whether the viewer follows the sender, if a profile was resolved.
    pub followed_by_me: Option<bool>,
}

impl SenderContext {
    /// Context for content the viewer sent themselves.
    #[must_use]
    pub const fn own() -> Self {
        Self {
            sent_by_me: true,
            followed_by_me: None,
        }
    }

    /// Context for content received from another sender.
    #[must_use]
    pub const fn received(followed_by_me: Option<bool>) -> Self {
        Self {
            sent_by_me: false,
            followed_by_me,
        }
    }

    /// Returns true if a profile was resolved and the viewer does not follow it.
    #[must_use]
    pub fn is_unfollowed(&self) -> bool {
        self.followed_by_me == Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_context() {
        let ctx = SenderContext::own();
        assert!(ctx.sent_by_me);
        assert!(!ctx.is_unfollowed());
    }

    #[test]
    fn test_unfollowed_requires_resolved_profile() {
        assert!(SenderContext::received(Some(false)).is_unfollowed());
        assert!(!SenderContext::received(Some(true)).is_unfollowed());
        assert!(!SenderContext::received(None).is_unfollowed());
    }
}
