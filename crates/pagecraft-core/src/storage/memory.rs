//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    blobs: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, blob: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        let blob = blob.to_string();
        Box::pin(async move {
            let mut blobs = self.blobs.write().map_err(lock_error)?;
            blobs.insert(key, blob);
            Ok(())
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>> {
        let key = key.to_string();
        Box::pin(async move {
            let blobs = self.blobs.read().map_err(lock_error)?;
            blobs.get(&key).cloned().ok_or(StorageError::NotFound(key))
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = key.to_string();
        Box::pin(async move {
            let blobs = self.blobs.read().map_err(lock_error)?;
            Ok(blobs.contains_key(&key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();

        block_on(storage.save("design", "[]")).unwrap();
        assert_eq!(block_on(storage.load("design")).unwrap(), "[]");

        block_on(storage.save("design", "[1]")).unwrap();
        assert_eq!(block_on(storage.load("design")).unwrap(), "[1]");
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(key)) if key == "nonexistent"));
    }

    #[test]
    fn test_exists() {
        let storage = MemoryStorage::new();

        assert!(!block_on(storage.exists("design")).unwrap());
        block_on(storage.save("design", "[]")).unwrap();
        assert!(block_on(storage.exists("design")).unwrap());
        assert!(!block_on(storage.exists("other")).unwrap());
    }
}
