//! Local persistence for the list collection.
//!
//! Two key-value backends mirror the storage a browser offers: a
//! durable JSON file (the primary) and a cookie-jar style file with
//! per-entry expiry (the secondary). The gateway writes to both and
//! reads from the first one that yields data.

mod cookie;
mod file;
mod gateway;

pub use cookie::CookieBackend;
pub use file::FileBackend;
pub use gateway::{LoadedState, PersistenceGateway, CURRENT_KEY, LISTS_KEY};

use crate::error::StorageError;

/// Narrow platform-storage contract the gateway writes through.
pub trait KeyValueBackend {
    /// Short label used in log messages.
    fn name(&self) -> &'static str;

    /// Read a value, `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value durably.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
