//! Component store: the design, its selection and its edit history.

use crate::components::{ComponentId, ComponentKind, DesignSnapshot, PlacedComponent, Properties};
use crate::error::{StoreError, StoreResult};
use crate::export::json;
use crate::history::HistoryLog;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::storage::Storage;
use kurbo::{Point, Vec2};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Offset applied to a duplicate so it does not sit exactly on its source.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Storage key of the saved design slot.
pub const SAVED_DESIGN_KEY: &str = "savedDesign";

/// Single source of truth for one editing session.
///
/// Every successful mutation records exactly one history entry; undo and redo
/// only move the history cursor. Selection is UI state and is never recorded.
pub struct ComponentStore {
    history: HistoryLog,
    selected: Option<ComponentId>,
    ids: Box<dyn IdGenerator>,
    /// Bumped whenever the active snapshot changes.
    revision: u64,
}

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentStore")
            .field("history", &self.history)
            .field("selected", &self.selected)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl ComponentStore {
    /// Create an empty store that assigns random UUIDs.
    pub fn new() -> Self {
        Self::with_id_generator(UuidGenerator)
    }

    /// Create an empty store with a custom id source.
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            history: HistoryLog::new(),
            selected: None,
            ids: Box::new(ids),
            revision: 0,
        }
    }

    /// The active snapshot.
    pub fn components(&self) -> &DesignSnapshot {
        self.history.current()
    }

    pub fn component(&self, id: &ComponentId) -> Option<&PlacedComponent> {
        self.components().get(id)
    }

    pub fn selected_id(&self) -> Option<&ComponentId> {
        self.selected.as_ref()
    }

    /// The selected component, if it exists in the active snapshot.
    pub fn selected_component(&self) -> Option<&PlacedComponent> {
        self.selected.as_ref().and_then(|id| self.component(id))
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Index of the active snapshot in the history.
    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Counter of active-snapshot changes, used to detect unsaved work.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Draw ids until one is free in the active snapshot.
    fn fresh_id(&mut self) -> ComponentId {
        loop {
            let id = self.ids.next_id();
            if !self.components().contains(&id) {
                return id;
            }
            log::debug!("Generated id {} already in use, drawing again", id);
        }
    }

    fn commit(&mut self, snapshot: DesignSnapshot, operation: &str) {
        self.history.record(snapshot);
        self.revision += 1;
        log::debug!(
            "{}: {} components, history {}/{}",
            operation,
            self.components().len(),
            self.history.cursor(),
            self.history.len() - 1
        );
    }

    /// Place a new component and select it.
    ///
    /// `position` must be finite; input boundaries check it through
    /// [`ComponentStore::add_component_tag`] or [`check_position`]. A design
    /// holding a non-finite position cannot be serialized.
    pub fn add_component(&mut self, kind: ComponentKind, position: Point) -> ComponentId {
        let id = self.fresh_id();
        let mut snapshot = self.components().clone();
        snapshot.push(PlacedComponent::new(id.clone(), kind, position));
        self.commit(snapshot, "add_component");
        self.selected = Some(id.clone());
        id
    }

    /// Place a new component from its string tag.
    ///
    /// Unknown tags and non-finite positions are rejected before any state changes.
    pub fn add_component_tag(&mut self, tag: &str, position: Point) -> StoreResult<ComponentId> {
        let kind: ComponentKind = tag.parse()?;
        check_position(position)?;
        Ok(self.add_component(kind, position))
    }

    /// Shallow-merge `partial` into a component's properties and optionally move it.
    pub fn update_properties(
        &mut self,
        id: &ComponentId,
        partial: Properties,
        position: Option<Point>,
    ) -> StoreResult<()> {
        if let Some(position) = position {
            check_position(position)?;
        }
        let mut snapshot = self.components().clone();
        let component = snapshot
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        component.properties.extend(partial);
        if let Some(position) = position {
            component.position = position;
        }
        self.commit(snapshot, "update_properties");
        Ok(())
    }

    /// Replace a component's position.
    pub fn move_component(&mut self, id: &ComponentId, x: f64, y: f64) -> StoreResult<()> {
        check_position(Point::new(x, y))?;
        let mut snapshot = self.components().clone();
        let component = snapshot
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        component.position = Point::new(x, y);
        self.commit(snapshot, "move_component");
        Ok(())
    }

    /// Remove a component, clearing the selection if it pointed at it.
    pub fn delete_component(&mut self, id: &ComponentId) -> StoreResult<()> {
        let mut snapshot = self.components().clone();
        snapshot
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.commit(snapshot, "delete_component");
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Ok(())
    }

    /// Copy a component under a new id, offset by [`DUPLICATE_OFFSET`], and select the copy.
    pub fn duplicate_component(&mut self, id: &ComponentId) -> StoreResult<ComponentId> {
        let source = self
            .component(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let new_id = self.fresh_id();
        let copy = source.cloned_as(new_id.clone(), source.position + DUPLICATE_OFFSET);

        let mut snapshot = self.components().clone();
        snapshot.push(copy);
        self.commit(snapshot, "duplicate_component");
        self.selected = Some(new_id.clone());
        Ok(new_id)
    }

    /// Delete the selected component.
    /// Returns the removed id, or None if nothing is selected or the selected
    /// component is not in the active snapshot.
    pub fn delete_selected(&mut self) -> StoreResult<Option<ComponentId>> {
        let Some(id) = self.selected_component().map(|c| c.id().clone()) else {
            return Ok(None);
        };
        self.delete_component(&id)?;
        Ok(Some(id))
    }

    /// Duplicate the selected component.
    /// Returns the id of the copy, or None if no selected component is in the
    /// active snapshot.
    pub fn duplicate_selected(&mut self) -> StoreResult<Option<ComponentId>> {
        match self.selected_component().map(|c| c.id().clone()) {
            Some(id) => self.duplicate_component(&id).map(Some),
            None => Ok(None),
        }
    }

    /// Change the selection. Never recorded in history.
    pub fn select_component(&mut self, id: Option<ComponentId>) {
        self.selected = id;
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.revision += 1;
            log::debug!("undo: history {}/{}", self.history.cursor(), self.history.len() - 1);
        }
        moved
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.revision += 1;
            log::debug!("redo: history {}/{}", self.history.cursor(), self.history.len() - 1);
        }
        moved
    }

    /// Replace the design with `snapshot`, recorded as a regular edit.
    pub fn load_design(&mut self, snapshot: DesignSnapshot) -> StoreResult<()> {
        if let Some(id) = snapshot.first_duplicate_id() {
            return Err(StoreError::DuplicateId(id.clone()));
        }
        self.commit(snapshot, "load_design");
        Ok(())
    }

    /// Serialize the active snapshot in the structured-data format.
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(json::to_json(self.components())?)
    }

    /// Write the active snapshot to the saved-design slot.
    pub async fn save_design<S: Storage + ?Sized>(&self, storage: &S) -> StoreResult<()> {
        let blob = self.to_json()?;
        storage.save(SAVED_DESIGN_KEY, &blob).await?;
        log::info!("Saved design with {} components", self.components().len());
        Ok(())
    }

    /// Read the saved-design slot and load it as a new history entry.
    pub async fn load_saved_design<S: Storage + ?Sized>(&mut self, storage: &S) -> StoreResult<()> {
        let blob = storage.load(SAVED_DESIGN_KEY).await?;
        let snapshot = json::from_json(&blob)?;
        let count = snapshot.len();
        self.load_design(snapshot)?;
        log::info!("Loaded saved design with {} components", count);
        Ok(())
    }
}

/// Reject positions with a NaN or infinite coordinate.
pub fn check_position(position: Point) -> StoreResult<Point> {
    if position.is_finite() {
        Ok(position)
    } else {
        Err(StoreError::InvalidPosition(position.x, position.y))
    }
}

/// Thread-safe handle to a store.
///
/// Each call to [`SharedComponentStore::with`] holds one lock for the whole
/// closure, so a compound read-modify-record sequence stays atomic.
#[derive(Debug, Clone, Default)]
pub struct SharedComponentStore {
    inner: Arc<Mutex<ComponentStore>>,
}

impl SharedComponentStore {
    pub fn new(store: ComponentStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut ComponentStore) -> R) -> StoreResult<R> {
        let mut store = self.inner.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&mut store))
    }
}
