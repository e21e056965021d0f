//! Directory-backed storage.
//!
//! Each key is a file `<root>/<key>.json`. Every write goes to its own
//! temporary file in the same directory and is renamed into place, so readers
//! see either the old blob or the new one even with concurrent writers.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{CartStorage, StorageError};

/// Storage that persists each key as a file under a root directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` unless the key is non-empty ASCII
    /// alphanumerics, `_`, or `-`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    fn io_error(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_owned(),
            source,
        }
    }
}

/// Check that a key is safe to use as a file name.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` for empty keys or keys containing
/// anything other than ASCII alphanumerics, `_`, or `-`.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

fn persist(tmp: NamedTempFile, path: &Path) -> std::io::Result<()> {
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl CartStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| Self::io_error(key, e))?;

        // Dropping the temp file on any error below removes it.
        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{key}."))
            .suffix(".tmp")
            .tempfile_in(&self.root)
            .map_err(|e| Self::io_error(key, e))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| Self::io_error(key, e))?;
        persist(tmp, &path).map_err(|e| Self::io_error(key, e))?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "Wrote storage key");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_in_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("store"));

        assert_eq!(storage.get_item("cart").unwrap(), None);

        storage.set_item("cart", "[1,2,3]").unwrap();
        assert_eq!(storage.get_item("cart").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(storage.root().join("cart.json").exists());
        assert_eq!(fs::read_dir(storage.root()).unwrap().count(), 1);
    }

    #[test]
    fn test_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set_item("cart", "old").unwrap();
        storage.set_item("cart", "new").unwrap();
        assert_eq!(storage.get_item("cart").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set_item("cart", "x").unwrap();
        storage.remove_item("cart").unwrap();
        assert_eq!(storage.get_item("cart").unwrap(), None);
        assert!(storage.remove_item("cart").is_ok());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        for key in ["", "../escape", "a/b", "a.b", "with space"] {
            assert!(
                matches!(storage.get_item(key), Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
        assert!(storage.path_for("yuvakart_cart-2").is_ok());
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the read fail.
        fs::create_dir(dir.path().join("cart.json")).unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(matches!(
            storage.get_item("cart"),
            Err(StorageError::Io { .. })
        ));
    }

    #[test]
    fn test_concurrent_writers_never_tear() {
        const BLOB_LEN: usize = 512 * 1024;
        const WRITES: usize = 20;

        let dir = tempfile::tempdir().unwrap();
        let blobs: Vec<String> = ['a', 'b', 'c', 'd']
            .into_iter()
            .map(|c| c.to_string().repeat(BLOB_LEN))
            .collect();

        std::thread::scope(|scope| {
            for blob in &blobs {
                let storage = FileStorage::new(dir.path());
                scope.spawn(move || {
                    for _ in 0..WRITES {
                        storage.set_item("cart", blob).unwrap();
                    }
                });
            }

            let reader = FileStorage::new(dir.path());
            for _ in 0..200 {
                if let Some(value) = reader.get_item("cart").unwrap() {
                    assert!(
                        blobs.contains(&value),
                        "read a blob of {} bytes that no writer wrote",
                        value.len()
                    );
                }
            }
        });

        let last = FileStorage::new(dir.path()).get_item("cart").unwrap().unwrap();
        assert!(blobs.contains(&last));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
