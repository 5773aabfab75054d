//! Periodic saving of the design to the saved-design slot.

use crate::error::StoreResult;
use crate::store::{ComponentStore, SAVED_DESIGN_KEY};
use crate::storage::{Storage, StorageResult};
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Saves a store whenever it has changed and the interval has elapsed.
///
/// Unsaved work is detected through [`ComponentStore::revision`], so the
/// manager never needs to be told about individual edits.
pub struct AutoSaveManager<S: Storage> {
    storage: Arc<S>,
    interval: Duration,
    last_save: Option<Instant>,
    /// Store revision written by the last save or restore.
    last_saved_revision: Option<u64>,
}

impl<S: Storage> AutoSaveManager<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            last_saved_revision: None,
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the store changed since the last save or restore.
    ///
    /// A store that has never been edited is not dirty.
    pub fn is_dirty(&self, store: &ComponentStore) -> bool {
        match self.last_saved_revision {
            Some(revision) => revision != store.revision(),
            None => store.revision() != 0,
        }
    }

    /// Check if the store is dirty and enough time has passed.
    pub fn should_save(&self, store: &ComponentStore) -> bool {
        if !self.is_dirty(store) {
            return false;
        }
        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save if needed. Returns true if a save was performed.
    pub async fn maybe_save(&mut self, store: &ComponentStore) -> StoreResult<bool> {
        if !self.should_save(store) {
            return Ok(false);
        }
        if let Err(e) = self.save(store).await {
            log::warn!("Auto-save failed: {}", e);
            return Err(e);
        }
        Ok(true)
    }

    /// Save immediately, regardless of the interval.
    pub async fn save(&mut self, store: &ComponentStore) -> StoreResult<()> {
        store.save_design(self.storage.as_ref()).await?;
        self.last_save = Some(Instant::now());
        self.last_saved_revision = Some(store.revision());
        Ok(())
    }

    /// Load the saved design into `store`, if one exists.
    ///
    /// Returns false when nothing has been saved yet.
    pub async fn restore(&mut self, store: &mut ComponentStore) -> StoreResult<bool> {
        if !self.storage.exists(SAVED_DESIGN_KEY).await? {
            return Ok(false);
        }
        store.load_saved_design(self.storage.as_ref()).await?;
        self.last_save = Some(Instant::now());
        self.last_saved_revision = Some(store.revision());
        Ok(true)
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Storage backend for the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = crate::storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = crate::storage::LocalStorage;

/// Create the platform storage backend at its default location.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<PlatformStorage>> {
    Ok(Arc::new(crate::storage::FileStorage::default_location()?))
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<Arc<PlatformStorage>> {
    Ok(Arc::new(crate::storage::LocalStorage::new()))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::components::ComponentKind;
    use crate::ids::SequentialIds;
    use crate::storage::{MemoryStorage, block_on};
    use kurbo::Point;

    fn store() -> ComponentStore {
        ComponentStore::with_id_generator(SequentialIds::default())
    }

    #[test]
    fn test_untouched_store_is_clean() {
        let manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));
        let store = store();

        assert!(!manager.is_dirty(&store));
        assert!(!manager.should_save(&store));
        assert_eq!(manager.interval(), Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS));
    }

    #[test]
    fn test_edit_makes_store_dirty_until_saved() {
        let mut manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));
        let mut store = store();
        store.add_component(ComponentKind::Heading, Point::new(1.0, 2.0));

        assert!(manager.is_dirty(&store));
        assert!(block_on(manager.maybe_save(&store)).unwrap());
        assert!(!manager.is_dirty(&store));
        assert!(!block_on(manager.maybe_save(&store)).unwrap());
        assert!(block_on(manager.storage().exists(SAVED_DESIGN_KEY)).unwrap());
    }

    #[test]
    fn test_interval_limits_saves() {
        let mut manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));
        let mut store = store();
        store.add_component(ComponentKind::Button, Point::ZERO);
        block_on(manager.save(&store)).unwrap();

        store.add_component(ComponentKind::Button, Point::ZERO);
        assert!(manager.is_dirty(&store));
        assert!(!manager.should_save(&store));

        manager.set_interval(Duration::ZERO);
        assert!(manager.should_save(&store));
    }

    #[test]
    fn test_undo_back_to_saved_state_still_dirty() {
        let mut manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));
        let mut store = store();
        store.add_component(ComponentKind::Card, Point::ZERO);
        block_on(manager.save(&store)).unwrap();

        store.undo();
        assert!(manager.is_dirty(&store));
    }

    #[test]
    fn test_restore_into_new_store() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage.clone());
        let mut original = store();
        original.add_component(ComponentKind::Map, Point::new(30.0, 40.0));
        block_on(manager.save(&original)).unwrap();

        let mut restorer = AutoSaveManager::new(storage);
        let mut restored = ComponentStore::new();
        assert!(block_on(restorer.restore(&mut restored)).unwrap());
        assert_eq!(restored.components(), original.components());
        assert!(!restorer.is_dirty(&restored));
    }

    #[test]
    fn test_restore_without_saved_design() {
        let mut manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));
        let mut store = store();
        assert!(!block_on(manager.restore(&mut store)).unwrap());
        assert!(store.components().is_empty());
    }
}
