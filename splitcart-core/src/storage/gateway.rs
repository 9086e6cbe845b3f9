//! Persistence gateway: best-effort writes to every backend, defensive
//! reads from the first backend that has data.

use serde_json::Value;
use tracing::{debug, warn};

use crate::codec::item_from_value;
use crate::models::{normalize_list_name, List, FALLBACK_LIST_NAME};

use super::{CookieBackend, FileBackend, KeyValueBackend};

/// Storage key for the serialized list collection.
pub const LISTS_KEY: &str = "splitcart.lists";
/// Storage key for the active list id.
pub const CURRENT_KEY: &str = "splitcart.current";

/// Result of loading persisted state.
///
/// `corrupted` is set when saved data existed but could not be parsed
/// at the top level; the caller surfaces a recoverable notice and the
/// store falls back to a default collection.
#[derive(Debug, Default)]
pub struct LoadedState {
    pub lists: Vec<List>,
    pub current_list_id: Option<String>,
    pub corrupted: bool,
}

/// Writes the collection to every backend in priority order and reads
/// it back from the first one that yields anything.
pub struct PersistenceGateway {
    backends: Vec<Box<dyn KeyValueBackend>>,
}

impl PersistenceGateway {
    /// Standard backend pair under `data_dir`: JSON file primary,
    /// cookie jar secondary.
    pub fn new(data_dir: std::path::PathBuf) -> Self {
        Self::with_backends(vec![
            Box::new(FileBackend::new(data_dir.join("storage.json"))),
            Box::new(CookieBackend::new(data_dir.join("cookies.txt"))),
        ])
    }

    pub fn with_backends(backends: Vec<Box<dyn KeyValueBackend>>) -> Self {
        Self { backends }
    }

    /// Persist the collection and active id to every backend.
    ///
    /// Best-effort: a failing backend is logged and skipped, never
    /// surfaced to the mutating caller.
    pub fn save(&mut self, lists: &[List], current_list_id: &str) {
        let serialized = match serde_json::to_string(lists) {
            Ok(s) => s,
            Err(e) => {
                warn!("failed to serialize list collection: {}", e);
                return;
            }
        };

        for backend in &mut self.backends {
            if let Err(e) = backend.set(LISTS_KEY, &serialized) {
                warn!("{} backend write failed for lists: {}", backend.name(), e);
            }
            if let Err(e) = backend.set(CURRENT_KEY, current_list_id) {
                warn!(
                    "{} backend write failed for current id: {}",
                    backend.name(),
                    e
                );
            }
        }
    }

    /// Load the collection, falling back through the backend order.
    pub fn load(&self) -> LoadedState {
        let mut state = LoadedState::default();

        for backend in &self.backends {
            if let Some(raw) = backend.get(LISTS_KEY) {
                debug!("loading list collection from {} backend", backend.name());
                let (lists, corrupted) = parse_collection(&raw);
                state.lists = lists;
                state.corrupted = corrupted;
                break;
            }
        }

        state.current_list_id = self
            .backends
            .iter()
            .find_map(|backend| backend.get(CURRENT_KEY))
            .filter(|id| !id.is_empty());

        state
    }
}

/// Parse a persisted collection defensively.
///
/// Malformed JSON or a non-array top level counts as corruption and
/// yields an empty collection; individual entries failing shape
/// validation are silently dropped.
fn parse_collection(raw: &str) -> (Vec<List>, bool) {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("persisted collection is not valid JSON: {}", e);
            return (Vec::new(), true);
        }
    };

    let entries = match value.as_array() {
        Some(a) => a,
        None => {
            warn!("persisted collection is not an array");
            return (Vec::new(), true);
        }
    };

    let lists = entries.iter().filter_map(list_from_value).collect();
    (lists, false)
}

/// Validate one persisted record as a list. Items inside it follow the
/// same per-item rules as share-token decoding.
fn list_from_value(value: &Value) -> Option<List> {
    let obj = value.as_object()?;
    let id = obj.get("id")?.as_str()?;
    if id.is_empty() {
        return None;
    }

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let items = obj
        .get("items")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(item_from_value).collect())
        .unwrap_or_default();

    Some(List {
        id: id.to_string(),
        name: normalize_list_name(name, FALLBACK_LIST_NAME),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use tempfile::tempdir;

    fn sample_lists() -> Vec<List> {
        let mut groceries = List::new("Groceries");
        groceries.items.push(Item::new("Milk", 2.5, "dairy").unwrap());
        let hardware = List::new("Hardware");
        vec![groceries, hardware]
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let mut gateway = PersistenceGateway::new(dir.path().to_path_buf());

        let lists = sample_lists();
        gateway.save(&lists, &lists[1].id);

        let state = gateway.load();
        assert_eq!(state.lists, lists);
        assert_eq!(state.current_list_id.as_deref(), Some(lists[1].id.as_str()));
        assert!(!state.corrupted);
    }

    #[test]
    fn test_load_falls_back_to_cookie_backend() {
        let dir = tempdir().unwrap();
        let lists = sample_lists();

        // Write through the cookie backend only
        let mut cookie_only = PersistenceGateway::with_backends(vec![Box::new(
            CookieBackend::new(dir.path().join("cookies.txt")),
        )]);
        cookie_only.save(&lists, &lists[0].id);

        // Primary file backend has nothing; read should fall through
        let gateway = PersistenceGateway::new(dir.path().to_path_buf());
        let state = gateway.load();
        assert_eq!(state.lists, lists);
        assert_eq!(state.current_list_id.as_deref(), Some(lists[0].id.as_str()));
    }

    #[test]
    fn test_load_empty_dir() {
        let dir = tempdir().unwrap();
        let state = PersistenceGateway::new(dir.path().to_path_buf()).load();
        assert!(state.lists.is_empty());
        assert!(state.current_list_id.is_none());
        assert!(!state.corrupted);
    }

    #[test]
    fn test_corrupted_collection_is_flagged() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("storage.json"));
        backend.set(LISTS_KEY, "{{{not json").unwrap();

        let state = PersistenceGateway::new(dir.path().to_path_buf()).load();
        assert!(state.lists.is_empty());
        assert!(state.corrupted);
    }

    #[test]
    fn test_non_array_collection_is_flagged() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("storage.json"));
        backend.set(LISTS_KEY, r#"{"lists":[]}"#).unwrap();

        let state = PersistenceGateway::new(dir.path().to_path_buf()).load();
        assert!(state.lists.is_empty());
        assert!(state.corrupted);
    }

    #[test]
    fn test_invalid_entries_are_dropped_not_fatal() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("storage.json"));
        let raw = r#"[
            {"id":"a1","name":"Groceries","items":[
                {"name":"Milk","price":2.5},
                {"name":"","price":1.0}
            ]},
            {"name":"no id","items":[]},
            {"id":"","name":"blank id"},
            42,
            {"id":"b2","name":"  ","items":"oops"}
        ]"#;
        backend.set(LISTS_KEY, raw).unwrap();

        let state = PersistenceGateway::new(dir.path().to_path_buf()).load();
        assert!(!state.corrupted);
        assert_eq!(state.lists.len(), 2);
        assert_eq!(state.lists[0].items.len(), 1);
        // Blank persisted name gets the fallback label
        assert_eq!(state.lists[1].name, FALLBACK_LIST_NAME);
        assert!(state.lists[1].items.is_empty());
    }
}
