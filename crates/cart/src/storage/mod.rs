//! Key/value storage backends for the persisted cart.
//!
//! [`CartStorage`] mirrors the browser `localStorage` surface the cart was
//! designed around: string values under string keys, read, write, and delete.
//! Backends report failures as [`StorageError`]; the cart store decides what
//! to do with them.

mod file;
mod memory;
mod unavailable;

use std::sync::Arc;

use thiserror::Error;

pub use file::FileStorage;
pub(crate) use file::validate_key;
pub use memory::MemoryStorage;
pub use unavailable::UnavailableStorage;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage exists in this context.
    #[error("storage is unavailable")]
    Unavailable,

    /// The key cannot be used by this backend.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Reading or writing the backing file failed.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A previous writer panicked while holding the lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string key/value store.
///
/// Implementations must be safe to share between threads, but callers get no
/// atomicity across calls: a read followed by a write can lose a concurrent
/// writer's update.
pub trait CartStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if unset.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting an unset key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: CartStorage + ?Sized> CartStorage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<T: CartStorage + ?Sized> CartStorage for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<T: CartStorage + ?Sized> CartStorage for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
