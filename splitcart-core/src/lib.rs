//! Splitcart Core Library
//!
//! State model for a local-first shared shopping list: named lists of
//! priced items, local persistence with a backend fallback chain,
//! share-token export/import with conflict merging, and pure derived
//! views (totals, per-person splits, projections).

pub mod codec;
pub mod collab;
pub mod error;
pub mod merge;
pub mod models;
pub mod storage;
pub mod store;
pub mod views;

pub use collab::{ConfirmPrompt, FixedResolver, MergeDecision, MergeResolver, Notice, NoticeKind};
pub use error::{DecodeError, StoreError, ValidationError};
pub use merge::{merge_items, MergeResult};
pub use models::{Item, List, SharePayload, DEFAULT_LIST_NAME, FALLBACK_LIST_NAME};
pub use storage::{LoadedState, PersistenceGateway};
pub use store::{ImportOutcome, ListStore};
pub use views::{filter_and_sort, format_price, per_person, summary_text, total, SortMode};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
