//! Error types shared across the core library.
//!
//! None of these are fatal to the application: validation and decode
//! errors abort a single operation, and storage read corruption is
//! recovered by resetting to a default collection.

use thiserror::Error;

/// Errors from validating user-supplied item or list input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("item name must not be empty")]
    EmptyName,

    #[error("item price must be a non-negative number, got {0}")]
    InvalidPrice(f64),
}

/// Errors from decoding an untrusted share token.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The token is not valid base64 / UTF-8 / JSON.
    #[error("share code is not readable; check that it was copied completely")]
    MalformedToken,

    /// The token decoded but is not a payload with an items list.
    #[error("share code does not contain a list of items")]
    InvalidPayloadShape,

    /// Every entry in the payload failed item validation.
    #[error("share code contains no valid items")]
    NoValidItems,
}

/// Errors from list store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no list with id '{0}'")]
    UnknownList(String),

    #[error("item index {index} is out of range (list has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors from writing to a storage backend.
///
/// These never propagate out of the persistence gateway; writes are
/// best-effort and failures are logged and swallowed.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}
