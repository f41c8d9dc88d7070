//! Auto-load gating for remote attachments.
//!
//! The gate is an ordered list of named rules evaluated first-match-wins.
//! Each rule either allows the load, blocks it with a reason, or passes to
//! the next rule.

use tracing::debug;

use crate::domain::entities::{RemoteAttachment, SenderContext};

/// Attachments above this size are not auto-loaded from other senders.
/// 100 MiB; the comparison is strictly greater-than.
pub const MAX_AUTO_LOAD_BYTES: u64 = 104_857_600;

/// Why an attachment was not auto-loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// The sender is not followed by the viewer.
    NotFollowed,
    /// The declared payload exceeds the auto-load size limit.
    TooLarge,
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFollowed => write!(
                f,
                "Attachments are not loaded automatically from people you don't follow."
            ),
            Self::TooLarge => write!(f, "Large attachments are not loaded automatically."),
        }
    }
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Load may proceed without user consent.
    Allow {
        /// The URL was already in the durable store; no network is needed.
        cached: bool,
    },
    /// Load requires explicit user consent.
    Block(BlockReason),
}

impl GateDecision {
    /// Returns true if the load may proceed automatically.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }

    /// Returns the block reason, if blocked.
    #[must_use]
    pub const fn block_reason(&self) -> Option<BlockReason> {
        match self {
            Self::Allow { .. } => None,
            Self::Block(reason) => Some(*reason),
        }
    }
}

enum RuleOutcome {
    Allow { cached: bool },
    Block(BlockReason),
    Pass,
}

struct GateRule {
    name: &'static str,
    apply: fn(&GateInput<'_>) -> RuleOutcome,
}

struct GateInput<'a> {
    descriptor: &'a RemoteAttachment,
    sender: &'a SenderContext,
    already_cached: bool,
    max_bytes: u64,
}

const RULES: &[GateRule] = &[
    // Persisted-store presence bypasses all gating.
    GateRule {
        name: "cached",
        apply: |input| {
            if input.already_cached {
                RuleOutcome::Allow { cached: true }
            } else {
                RuleOutcome::Pass
            }
        },
    },
    // The viewer's own content is always loaded, regardless of size.
    GateRule {
        name: "sent-by-me",
        apply: |input| {
            if input.sender.sent_by_me {
                RuleOutcome::Allow { cached: false }
            } else {
                RuleOutcome::Pass
            }
        },
    },
    GateRule {
        name: "not-followed",
        apply: |input| {
            if input.sender.is_unfollowed() {
                RuleOutcome::Block(BlockReason::NotFollowed)
            } else {
                RuleOutcome::Pass
            }
        },
    },
    GateRule {
        name: "too-large",
        apply: |input| {
            if input.descriptor.content_length > input.max_bytes {
                RuleOutcome::Block(BlockReason::TooLarge)
            } else {
                RuleOutcome::Pass
            }
        },
    },
];

/// Decides whether a remote attachment should auto-load.
#[derive(Debug, Clone, Copy)]
pub struct GatePolicy {
    max_bytes: u64,
}

impl GatePolicy {
    /// Creates a policy with a custom size limit.
    #[must_use]
    pub const fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Evaluates the gate for a descriptor before any network access.
    #[must_use]
    pub fn decide(
        &self,
        descriptor: &RemoteAttachment,
        sender: &SenderContext,
        already_cached: bool,
    ) -> GateDecision {
        let input = GateInput {
            descriptor,
            sender,
            already_cached,
            max_bytes: self.max_bytes,
        };

        for rule in RULES {
            match (rule.apply)(&input) {
                RuleOutcome::Allow { cached } => {
                    debug!(url = %descriptor.url, rule = rule.name, "Gate allowed");
                    return GateDecision::Allow { cached };
                }
                RuleOutcome::Block(reason) => {
                    debug!(url = %descriptor.url, rule = rule.name, "Gate blocked");
                    return GateDecision::Block(reason);
                }
                RuleOutcome::Pass => {}
            }
        }

        debug!(url = %descriptor.url, rule = "default", "Gate allowed");
        GateDecision::Allow { cached: false }
    }
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self::new(MAX_AUTO_LOAD_BYTES)
    }
}
