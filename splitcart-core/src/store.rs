//! In-memory list collection and its mutation surface.
//!
//! The store owns the lists and the current-list pointer. Two
//! invariants hold for every constructed store: the collection is
//! never empty, and the current id always references an existing
//! list. Every mutator persists through the gateway before returning;
//! the gateway's own writes are best-effort.

use tracing::info;

use crate::collab::{MergeResolver, Notice};
use crate::error::StoreError;
use crate::merge::merge_items;
use crate::models::{normalize_list_name, Item, List, SharePayload, FALLBACK_LIST_NAME};
use crate::storage::PersistenceGateway;

/// Result of importing a share payload into the current list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The merge ran to completion and was committed.
    Completed {
        added: usize,
        merged: usize,
        kept_both: usize,
    },
    /// The user canceled a conflict prompt; nothing was changed.
    Aborted,
}

/// Owner of the list collection.
pub struct ListStore {
    lists: Vec<List>,
    current_list_id: String,
    gateway: PersistenceGateway,
}

impl ListStore {
    /// Load persisted state and establish the store invariants.
    ///
    /// An empty or absent collection is replaced by a single default
    /// list; a stale current pointer falls back to the first list. A
    /// corruption notice is pushed when saved data existed but could
    /// not be parsed.
    pub fn init(gateway: PersistenceGateway, notices: &mut Vec<Notice>) -> Self {
        let state = gateway.load();
        if state.corrupted {
            notices.push(Notice::error(
                "Saved lists could not be read; starting fresh with a default list.",
            ));
        }

        let mut lists = state.lists;
        if lists.is_empty() {
            info!("no persisted lists, synthesizing default list");
            lists.push(List::default_list());
        }

        let current_list_id = state
            .current_list_id
            .filter(|id| lists.iter().any(|l| &l.id == id))
            .unwrap_or_else(|| lists[0].id.clone());

        let mut store = Self {
            lists,
            current_list_id,
            gateway,
        };
        // Write back the normalized state so both backends agree
        store.persist();
        store
    }

    fn persist(&mut self) {
        self.gateway.save(&self.lists, &self.current_list_id);
    }

    // --- accessors -----------------------------------------------------

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn current_list_id(&self) -> &str {
        &self.current_list_id
    }

    pub fn find_list(&self, id: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.id == id)
    }

    /// The single list selected for display and editing.
    pub fn current_list(&self) -> &List {
        self.lists
            .iter()
            .find(|l| l.id == self.current_list_id)
            .unwrap_or(&self.lists[0])
    }

    // --- list-level mutations ------------------------------------------

    /// Create a list, make it current, persist. Blank names get the
    /// fallback label.
    pub fn create_list(&mut self, name: &str) -> &List {
        let list = List::new(name);
        self.current_list_id = list.id.clone();
        self.lists.push(list);
        self.persist();
        // Just pushed, so last() is the new list
        &self.lists[self.lists.len() - 1]
    }

    /// Delete a list. Deleting the last remaining list replaces the
    /// collection with one fresh default list.
    pub fn delete_list(&mut self, id: &str) -> Result<(), StoreError> {
        let index = self
            .lists
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| StoreError::UnknownList(id.to_string()))?;

        if self.lists.len() == 1 {
            self.lists = vec![List::default_list()];
            self.current_list_id = self.lists[0].id.clone();
        } else {
            self.lists.remove(index);
            if self.current_list_id == id {
                self.current_list_id = self.lists[0].id.clone();
            }
        }

        self.persist();
        Ok(())
    }

    /// Rename a list in place (replace-style: the whole name is
    /// swapped, blank input falls back to the default label).
    pub fn rename_list(&mut self, id: &str, name: &str) -> Result<(), StoreError> {
        let list = self.find_list_mut(id)?;
        list.name = normalize_list_name(name.to_string(), FALLBACK_LIST_NAME);
        self.persist();
        Ok(())
    }

    /// Remove every item from a list without deleting the list.
    pub fn clear_items(&mut self, id: &str) -> Result<(), StoreError> {
        self.find_list_mut(id)?.items.clear();
        self.persist();
        Ok(())
    }

    /// Select a list as current. An unknown id is a silent no-op.
    pub fn set_current(&mut self, id: &str) {
        if self.lists.iter().any(|l| l.id == id) {
            self.current_list_id = id.to_string();
            self.persist();
        }
    }

    // --- item-level mutations ------------------------------------------

    pub fn add_item(&mut self, list_id: &str, item: Item) -> Result<(), StoreError> {
        item.validate()?;
        self.find_list_mut(list_id)?.items.push(item);
        self.persist();
        Ok(())
    }

    /// Replace the item at `index` with a new record.
    pub fn update_item(&mut self, list_id: &str, index: usize, item: Item) -> Result<(), StoreError> {
        item.validate()?;
        let list = self.find_list_mut(list_id)?;
        let len = list.items.len();
        let slot = list
            .items
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        *slot = item;
        self.persist();
        Ok(())
    }

    pub fn remove_item(&mut self, list_id: &str, index: usize) -> Result<(), StoreError> {
        let list = self.find_list_mut(list_id)?;
        let len = list.items.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        list.items.remove(index);
        self.persist();
        Ok(())
    }

    // --- import --------------------------------------------------------

    /// Merge a decoded share payload into the current list.
    ///
    /// The merge runs on a scratch copy and is committed only when it
    /// completes, so a canceled conflict prompt leaves the list exactly
    /// as it was.
    pub fn import_payload(
        &mut self,
        payload: &SharePayload,
        resolver: &mut dyn MergeResolver,
    ) -> ImportOutcome {
        let existing = &self.current_list().items;
        let result = match merge_items(existing, payload.items.clone(), resolver) {
            Some(r) => r,
            None => return ImportOutcome::Aborted,
        };

        let outcome = ImportOutcome::Completed {
            added: result.added,
            merged: result.merged,
            kept_both: result.kept_both,
        };

        let current_id = self.current_list_id.clone();
        if let Ok(list) = self.find_list_mut(&current_id) {
            list.items = result.items;
        }
        self.persist();
        outcome
    }

    fn find_list_mut(&mut self, id: &str) -> Result<&mut List, StoreError> {
        self.lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::UnknownList(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{FixedResolver, MergeDecision, NoticeKind};
    use crate::storage::{FileBackend, KeyValueBackend, LISTS_KEY};
    use tempfile::{tempdir, TempDir};

    fn fresh_store() -> (ListStore, TempDir, Vec<Notice>) {
        let dir = tempdir().unwrap();
        let gateway = PersistenceGateway::new(dir.path().to_path_buf());
        let mut notices = Vec::new();
        let store = ListStore::init(gateway, &mut notices);
        (store, dir, notices)
    }

    fn item(name: &str, price: f64) -> Item {
        Item::new(name, price, "").unwrap()
    }

    #[test]
    fn test_init_synthesizes_default_list() {
        let (store, _dir, notices) = fresh_store();
        assert!(notices.is_empty());
        assert_eq!(store.lists().len(), 1);
        assert_eq!(store.current_list().name, "Default list");
        assert!(store.current_list().items.is_empty());
    }

    #[test]
    fn test_init_recovers_from_corruption_with_notice() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("storage.json"));
        backend.set(LISTS_KEY, "][ not json").unwrap();

        let gateway = PersistenceGateway::new(dir.path().to_path_buf());
        let mut notices = Vec::new();
        let store = ListStore::init(gateway, &mut notices);

        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Error);
        assert_eq!(store.lists().len(), 1);
        assert_eq!(store.current_list().name, "Default list");
    }

    #[test]
    fn test_init_fixes_stale_current_pointer() {
        let (mut store, dir, _) = fresh_store();
        store.create_list("Groceries");
        drop(store);

        // Point current at a list that no longer exists
        let mut backend = FileBackend::new(dir.path().join("storage.json"));
        backend.set(crate::storage::CURRENT_KEY, "gone").unwrap();

        let mut notices = Vec::new();
        let store = ListStore::init(
            PersistenceGateway::new(dir.path().to_path_buf()),
            &mut notices,
        );
        assert_eq!(store.current_list_id(), store.lists()[0].id);
    }

    #[test]
    fn test_state_survives_reload() {
        let (mut store, dir, _) = fresh_store();
        let id = store.create_list("Groceries").id.clone();
        store.add_item(&id, item("Milk", 2.5)).unwrap();
        store.add_item(&id, item("Bread", 3.0)).unwrap();
        drop(store);

        let mut notices = Vec::new();
        let store = ListStore::init(
            PersistenceGateway::new(dir.path().to_path_buf()),
            &mut notices,
        );
        assert_eq!(store.lists().len(), 2);
        assert_eq!(store.current_list().name, "Groceries");
        assert_eq!(store.current_list().items.len(), 2);
    }

    #[test]
    fn test_create_list_becomes_current() {
        let (mut store, _dir, _) = fresh_store();
        let id = store.create_list("  Groceries  ").id.clone();
        assert_eq!(store.current_list_id(), id);
        assert_eq!(store.current_list().name, "Groceries");

        let blank = store.create_list("   ").name.clone();
        assert_eq!(blank, FALLBACK_LIST_NAME);
    }

    #[test]
    fn test_delete_last_list_resets_to_default() {
        let (mut store, _dir, _) = fresh_store();
        let id = store.current_list().id.clone();
        store.add_item(&id, item("Milk", 2.5)).unwrap();

        store.delete_list(&id).unwrap();

        assert_eq!(store.lists().len(), 1);
        let fresh = store.current_list();
        assert_ne!(fresh.id, id);
        assert_eq!(fresh.name, "Default list");
        assert!(fresh.items.is_empty());
    }

    #[test]
    fn test_delete_current_repoints_to_first() {
        let (mut store, _dir, _) = fresh_store();
        let first = store.current_list().id.clone();
        let second = store.create_list("Groceries").id.clone();
        assert_eq!(store.current_list_id(), second);

        store.delete_list(&second).unwrap();
        assert_eq!(store.current_list_id(), first);

        assert!(matches!(
            store.delete_list("nope"),
            Err(StoreError::UnknownList(_))
        ));
    }

    #[test]
    fn test_delete_non_current_keeps_pointer() {
        let (mut store, _dir, _) = fresh_store();
        let first = store.current_list().id.clone();
        let second = store.create_list("Groceries").id.clone();

        store.delete_list(&first).unwrap();
        assert_eq!(store.current_list_id(), second);
    }

    #[test]
    fn test_set_current_unknown_id_is_noop() {
        let (mut store, _dir, _) = fresh_store();
        let id = store.current_list().id.clone();
        store.set_current("does-not-exist");
        assert_eq!(store.current_list_id(), id);
    }

    #[test]
    fn test_item_mutations_and_bounds() {
        let (mut store, _dir, _) = fresh_store();
        let id = store.current_list().id.clone();

        store.add_item(&id, item("Milk", 2.5)).unwrap();
        store.add_item(&id, item("Bread", 3.0)).unwrap();

        store.update_item(&id, 1, item("Rye bread", 3.5)).unwrap();
        assert_eq!(store.current_list().items[1].name, "Rye bread");

        assert!(matches!(
            store.update_item(&id, 5, item("x", 1.0)),
            Err(StoreError::IndexOutOfRange { index: 5, len: 2 })
        ));
        assert!(matches!(
            store.remove_item(&id, 2),
            Err(StoreError::IndexOutOfRange { .. })
        ));

        store.remove_item(&id, 0).unwrap();
        assert_eq!(store.current_list().items.len(), 1);
        assert_eq!(store.current_list().items[0].name, "Rye bread");

        store.clear_items(&id).unwrap();
        assert!(store.current_list().items.is_empty());
    }

    #[test]
    fn test_invalid_item_is_rejected_without_mutation() {
        let (mut store, _dir, _) = fresh_store();
        let id = store.current_list().id.clone();

        let bad = Item {
            name: "  ".to_string(),
            price: 1.0,
            category: String::new(),
        };
        assert!(matches!(
            store.add_item(&id, bad),
            Err(StoreError::Validation(_))
        ));
        assert!(store.current_list().items.is_empty());
    }

    #[test]
    fn test_import_merge_scenario() {
        // Import {milk, 3.0} against [{Milk, 2.5}] resolved as merge
        let (mut store, _dir, _) = fresh_store();
        let id = store.current_list().id.clone();
        store.add_item(&id, item("Milk", 2.5)).unwrap();

        let payload = SharePayload {
            name: "Groceries".to_string(),
            items: vec![item("milk", 3.0)],
        };
        let outcome =
            store.import_payload(&payload, &mut FixedResolver(MergeDecision::Merge));

        assert_eq!(
            outcome,
            ImportOutcome::Completed {
                added: 0,
                merged: 1,
                kept_both: 0
            }
        );
        assert_eq!(store.current_list().items.len(), 1);
        assert_eq!(store.current_list().items[0].name, "Milk");
        assert_eq!(store.current_list().items[0].price, 3.0);
    }

    #[test]
    fn test_import_cancel_leaves_state_untouched() {
        struct Cancel;
        impl MergeResolver for Cancel {
            fn resolve(&mut self, _: &Item, _: &Item) -> Option<MergeDecision> {
                None
            }
        }

        let (mut store, _dir, _) = fresh_store();
        let id = store.current_list().id.clone();
        store.add_item(&id, item("Milk", 2.5)).unwrap();

        let payload = SharePayload {
            name: "x".to_string(),
            items: vec![item("Eggs", 4.0), item("milk", 3.0)],
        };
        let outcome = store.import_payload(&payload, &mut Cancel);

        assert_eq!(outcome, ImportOutcome::Aborted);
        // Not even the non-conflicting "Eggs" was committed
        assert_eq!(store.current_list().items.len(), 1);
        assert_eq!(store.current_list().items[0].price, 2.5);
    }
}
