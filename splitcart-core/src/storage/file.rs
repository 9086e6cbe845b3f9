//! Primary backend: a single JSON file of key-value pairs.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::error::StorageError;

use super::KeyValueBackend;

/// Durable key-value store backed by one JSON object file.
///
/// The whole file is rewritten on every `set`; state is small enough
/// that this stays cheap and keeps the file human-inspectable.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => BTreeMap::new(),
        }
    }
}

impl KeyValueBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let contents = serde_json::to_string_pretty(&map)?;
        fs::write(&self.path, contents).map_err(|e| StorageError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_get_missing_key() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("storage.json"));
        assert!(backend.get("anything").is_none());
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("nested/storage.json"));

        backend.set("a", "1").unwrap();
        backend.set("b", "two").unwrap();
        backend.set("a", "updated").unwrap();

        assert_eq!(backend.get("a").as_deref(), Some("updated"));
        assert_eq!(backend.get("b").as_deref(), Some("two"));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{{{not json").unwrap();

        let mut backend = FileBackend::new(path);
        assert!(backend.get("a").is_none());

        // A write recovers the file
        backend.set("a", "1").unwrap();
        assert_eq!(backend.get("a").as_deref(), Some("1"));
    }
}
