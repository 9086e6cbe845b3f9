//! Named lists of items and the exportable share payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Item;

/// Name given to a list created with a blank name.
pub const FALLBACK_LIST_NAME: &str = "New list";

/// Name of the list synthesized when the collection would be empty.
pub const DEFAULT_LIST_NAME: &str = "Default list";

/// A named, ordered collection of priced items.
///
/// The id is assigned once at creation and never changes. Lists are
/// owned exclusively by the [`ListStore`](crate::store::ListStore);
/// rendering code never mutates them directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct List {
    /// Opaque unique id within the collection
    pub id: String,
    /// Display name, never empty
    pub name: String,
    /// Items in insertion order (display default order)
    pub items: Vec<Item>,
}

impl List {
    /// Create an empty list with a fresh id. Blank names fall back to
    /// [`FALLBACK_LIST_NAME`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: normalize_list_name(name.into(), FALLBACK_LIST_NAME),
            items: Vec::new(),
        }
    }

    /// The single list synthesized whenever the collection would
    /// otherwise be empty.
    pub fn default_list() -> Self {
        Self::new(DEFAULT_LIST_NAME)
    }
}

/// Trim a candidate list name, substituting `fallback` when blank.
pub fn normalize_list_name(name: String, fallback: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// One list's exportable contents: the list stripped of its id.
///
/// Importing a payload never carries over the source list's identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SharePayload {
    /// Source list name, for display only
    pub name: String,
    /// Items in export order
    pub items: Vec<Item>,
}

impl From<&List> for SharePayload {
    fn from(list: &List) -> Self {
        Self {
            name: list.name.clone(),
            items: list.items.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_unique_ids() {
        let a = List::new("Groceries");
        let b = List::new("Groceries");
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Groceries");
        assert!(a.items.is_empty());
    }

    #[test]
    fn test_blank_name_falls_back() {
        assert_eq!(List::new("   ").name, FALLBACK_LIST_NAME);
        assert_eq!(List::new("").name, FALLBACK_LIST_NAME);
    }

    #[test]
    fn test_default_list() {
        let list = List::default_list();
        assert_eq!(list.name, DEFAULT_LIST_NAME);
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_share_payload_strips_id() {
        let mut list = List::new("Groceries");
        list.items.push(Item::new("Milk", 2.5, "dairy").unwrap());

        let payload = SharePayload::from(&list);
        assert_eq!(payload.name, "Groceries");
        assert_eq!(payload.items, list.items);

        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains(&list.id));
    }
}
