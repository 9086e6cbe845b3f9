//! Secondary backend: cookie-jar style storage with per-entry expiry.

use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::path::PathBuf;

use crate::error::StorageError;

use super::KeyValueBackend;

/// Default cookie lifetime in days.
pub const COOKIE_TTL_DAYS: i64 = 365;

/// Key-value store written as one cookie per line:
/// `<expiry-rfc3339>\t<key>=<percent-encoded-value>`.
///
/// Expired entries are dropped whenever the jar is read or rewritten.
#[derive(Debug, Clone)]
pub struct CookieBackend {
    path: PathBuf,
    ttl: Duration,
}

impl CookieBackend {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ttl: Duration::days(COOKIE_TTL_DAYS),
        }
    }

    #[cfg(test)]
    fn with_ttl(path: PathBuf, ttl: Duration) -> Self {
        Self { path, ttl }
    }

    /// All live (unexpired, well-formed) entries in file order.
    fn read_entries(&self) -> Vec<(DateTime<Utc>, String, String)> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        let now = Utc::now();
        contents
            .lines()
            .filter_map(|line| {
                let (stamp, pair) = line.split_once('\t')?;
                let expiry = DateTime::parse_from_rfc3339(stamp).ok()?.with_timezone(&Utc);
                if expiry <= now {
                    return None;
                }
                let (key, encoded) = pair.split_once('=')?;
                let value = urlencoding::decode(encoded).ok()?.into_owned();
                Some((expiry, key.to_string(), value))
            })
            .collect()
    }

    fn write_entries(
        &self,
        entries: &[(DateTime<Utc>, String, String)],
    ) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut contents = String::new();
        for (expiry, key, value) in entries {
            contents.push_str(&format!(
                "{}\t{}={}\n",
                expiry.to_rfc3339(),
                key,
                urlencoding::encode(value)
            ));
        }
        fs::write(&self.path, contents).map_err(|e| StorageError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl KeyValueBackend for CookieBackend {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.read_entries()
            .into_iter()
            .find(|(_, k, _)| k == key)
            .map(|(_, _, v)| v)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries();
        entries.retain(|(_, k, _)| k != key);
        entries.push((Utc::now() + self.ttl, key.to_string(), value.to_string()));
        self.write_entries(&entries)
    }
}
