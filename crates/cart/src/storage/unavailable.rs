//! Storage for contexts that have none.

use super::{CartStorage, StorageError};

/// A backend where every call fails with [`StorageError::Unavailable`].
///
/// Stands in for running outside a browser: the cart store reads it as an
/// empty cart and drops writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStorage;

impl CartStorage for UnavailableStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
