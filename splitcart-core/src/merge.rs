//! Import merge engine.
//!
//! Reconciles an imported item sequence against a list's existing
//! items by case-insensitive name match. The engine works on a copy
//! of the existing items and never mutates the store; committing the
//! result is the caller's job, which is what makes a mid-import
//! cancel free of partial state.

use crate::collab::{MergeDecision, MergeResolver};
use crate::models::Item;

/// Outcome of a completed merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    /// The full merged item sequence, ready to commit.
    pub items: Vec<Item>,
    /// Imported items appended without a name match.
    pub added: usize,
    /// Conflicts resolved by overwriting the existing item.
    pub merged: usize,
    /// Conflicts resolved by keeping both entries.
    pub kept_both: usize,
}

/// Merge `imported` into a copy of `existing`.
///
/// Conflicts are resolved strictly in import order, one at a time; an
/// item appended earlier in the same import joins the match set for
/// later items. Every imported item ends up either merged into an
/// existing record or appended, never dropped. Returns `None` when the
/// resolver cancels, leaving nothing committed.
pub fn merge_items(
    existing: &[Item],
    imported: Vec<Item>,
    resolver: &mut dyn MergeResolver,
) -> Option<MergeResult> {
    let mut items = existing.to_vec();
    let mut added = 0;
    let mut merged = 0;
    let mut kept_both = 0;

    for incoming in imported {
        let matched = items.iter().position(|it| it.same_name(&incoming));
        match matched {
            None => {
                items.push(incoming);
                added += 1;
            }
            Some(index) => match resolver.resolve(&items[index], &incoming)? {
                MergeDecision::Merge => {
                    let current = &mut items[index];
                    current.price = incoming.price;
                    current.category = incoming.category;
                    merged += 1;
                }
                MergeDecision::KeepBoth => {
                    items.push(incoming);
                    kept_both += 1;
                }
            },
        }
    }

    Some(MergeResult {
        items,
        added,
        merged,
        kept_both,
    })
}
