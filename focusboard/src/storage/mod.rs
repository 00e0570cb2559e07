//! Storage adapter abstraction for Focusboard.
//!
//! Defines the [`Storage`] trait the task store and theme setting persist
//! through: a synchronous string-keyed store of text blobs. Concrete
//! implementations:
//! - [`memory::MemoryStorage`]: in-process map, for tests and ephemeral runs
//! - [`file::FileStorage`]: one file per key inside a data directory

pub mod file;
pub mod memory;

use std::path::PathBuf;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur when writing to storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The key cannot be used by this adapter.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// An underlying I/O error occurred.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Synchronous key-value store of text blobs.
///
/// Reads never fail: anything that cannot be read is reported as absent,
/// and callers treat absent data as "nothing stored yet".
pub trait Storage: Send + Sync {
    /// Returns the text stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value could not be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key exists but could not be removed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
