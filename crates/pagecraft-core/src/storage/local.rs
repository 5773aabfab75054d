//! Browser `localStorage` implementation for WebAssembly.

use super::{BoxFuture, Storage, StorageError, StorageResult};

/// Storage backed by `window.localStorage`.
///
/// Keys are used verbatim, so the saved-design slot is the page's
/// `savedDesign` item.
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn backend() -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))
    }
}

impl Storage for LocalStorage {
    fn save(&self, key: &str, blob: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        let blob = blob.to_string();
        Box::pin(async move {
            Self::backend()?
                .set_item(&key, &blob)
                .map_err(|e| StorageError::Io(format!("Failed to write {}: {:?}", key, e)))
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>> {
        let key = key.to_string();
        Box::pin(async move {
            Self::backend()?
                .get_item(&key)
                .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))?
                .ok_or(StorageError::NotFound(key))
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = key.to_string();
        Box::pin(async move {
            let item = Self::backend()?
                .get_item(&key)
                .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))?;
            Ok(item.is_some())
        })
    }
}
