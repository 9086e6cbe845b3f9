//! Contracts for the external collaborators the core calls out to.
//!
//! The core never renders anything itself; it produces [`Notice`]
//! values for a notification sink and asks a [`MergeResolver`] or
//! [`ConfirmPrompt`] whenever a user decision is needed. A canceled
//! prompt is a normal outcome, not an error.

use crate::models::Item;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message for the notification sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Resolution of one import conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// Overwrite the existing item's price and category with the
    /// imported values; the stored name is kept.
    Merge,
    /// Append the imported item as a separate entry; duplicate names
    /// are permitted.
    KeepBoth,
}

/// Decision prompt consulted once per import conflict, in import order.
pub trait MergeResolver {
    /// `None` means the user canceled; the whole import is abandoned
    /// with no partial mutation.
    fn resolve(&mut self, existing: &Item, incoming: &Item) -> Option<MergeDecision>;
}

/// Yes/no prompt used before destructive operations.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Resolver applying the same fixed decision to every conflict.
/// Useful for non-interactive callers and tests.
pub struct FixedResolver(pub MergeDecision);

impl MergeResolver for FixedResolver {
    fn resolve(&mut self, _existing: &Item, _incoming: &Item) -> Option<MergeDecision> {
        Some(self.0)
    }
}
