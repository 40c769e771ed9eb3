//! Key-value blob storage
//!
//! A blob store keeps one opaque string per key. There is no indexing,
//! locking or versioning: the last write wins.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{AppError, AppResult};

/// Get/set/remove a whole blob under a key
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Blob store backed by one JSON file per key in a directory
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", key, e)))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(AppError::Storage(format!("Failed to replace {}: {}", key, e)));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("Failed to remove {}: {}", key, e))),
        }
    }
}

/// In-process blob store
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.blobs
            .lock()
            .map_err(|_| AppError::Storage("memory store lock poisoned".to_string()))
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FileBlobStore {
        let dir = std::env::temp_dir().join(format!("boom-store-{}", uuid::Uuid::new_v4()));
        FileBlobStore::new(dir)
    }

    #[test]
    fn test_file_store_get_missing_key() {
        let store = temp_store();
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_get_remove() {
        let store = temp_store();
        store.set("boom_art_sales_data", "[]").unwrap();
        assert_eq!(store.get("boom_art_sales_data").unwrap().as_deref(), Some("[]"));

        store.set("boom_art_sales_data", "[1]").unwrap();
        assert_eq!(store.get("boom_art_sales_data").unwrap().as_deref(), Some("[1]"));

        store.remove("boom_art_sales_data").unwrap();
        assert_eq!(store.get("boom_art_sales_data").unwrap(), None);
        // removing twice is fine
        store.remove("boom_art_sales_data").unwrap();

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_failed_replace_leaves_no_temp_file() {
        let store = temp_store();
        // a directory in the way makes the rename fail
        fs::create_dir_all(store.path_for("blocked").join("inner")).unwrap();

        assert!(matches!(store.set("blocked", "[]"), Err(AppError::Storage(_))));
        assert!(!store.path_for("blocked").with_extension("json.tmp").exists());

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_file_store_sanitizes_keys() {
        let store = temp_store();
        assert_eq!(
            store.path_for("../etc/passwd"),
            store.dir().join("___etc_passwd.json")
        );
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryBlobStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
