//! Directory-backed record store.
//!
//! Each record lives in `<dir>/<key>.json`. This is the native stand-in for a
//! browser's local storage: one small file per named entry, rewritten whole.

use hirer_traits::{KeyValueStore, StorageError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        let write_failed = |e: std::io::Error| StorageError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        };
        std::fs::create_dir_all(&self.dir).map_err(write_failed)?;
        std::fs::write(&path, value).map_err(write_failed)?;
        log::debug!("Wrote record '{}' to {}", key, path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "FileKeyValueStore"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_record_is_none() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        assert_eq!(store.get("cart-q").unwrap(), None);
    }

    #[test]
    fn test_set_creates_directory_and_roundtrips() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("nested/state"));

        store.set("cart-q", "{\"cs1\":2}").unwrap();
        assert_eq!(store.get("cart-q").unwrap().as_deref(), Some("{\"cs1\":2}"));
        assert!(dir.path().join("nested/state/cart-q.json").exists());
    }

    #[test]
    fn test_rejects_unsafe_keys() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        assert!(matches!(store.set("../escape", "x"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
        assert!(matches!(store.get(".hidden"), Err(StorageError::InvalidKey(_))));
    }
}
