//! Editing session: one store, one storage backend.

use crate::command::BuilderCommand;
use pagecraft_core::storage::Storage;
use pagecraft_core::{
    ComponentId, ComponentStore, ExportError, ExportFormat, StoreResult, check_position, export_design,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A component was created (placed or duplicated).
    Created(ComponentId),
    /// A component was removed.
    Deleted(ComponentId),
    /// The command took effect.
    Applied,
    /// Nothing to do: no selection, or no history in that direction.
    Ignored,
}

/// A generated file, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its file name.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        Ok(path)
    }
}

pub struct Session<S: Storage> {
    store: ComponentStore,
    storage: Arc<S>,
}

impl<S: Storage> Session<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_store(ComponentStore::new(), storage)
    }

    pub fn with_store(store: ComponentStore, storage: Arc<S>) -> Self {
        Self { store, storage }
    }

    pub fn store(&self) -> &ComponentStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ComponentStore {
        &mut self.store
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Apply one input event to the store.
    pub async fn dispatch(&mut self, command: BuilderCommand) -> StoreResult<CommandOutcome> {
        log::debug!("Dispatching {:?}", command);
        let outcome = match command {
            BuilderCommand::Place { kind, position } => {
                let position = check_position(position)?;
                CommandOutcome::Created(self.store.add_component(kind, position))
            }
            BuilderCommand::Move { id, x, y } => {
                self.store.move_component(&id, x, y)?;
                CommandOutcome::Applied
            }
            BuilderCommand::SetProperties { id, props, position } => {
                self.store.update_properties(&id, props, position)?;
                CommandOutcome::Applied
            }
            BuilderCommand::Select { id } => {
                self.store.select_component(id);
                CommandOutcome::Applied
            }
            BuilderCommand::DeleteSelected => match self.store.delete_selected()? {
                Some(id) => CommandOutcome::Deleted(id),
                None => CommandOutcome::Ignored,
            },
            BuilderCommand::DuplicateSelected => match self.store.duplicate_selected()? {
                Some(id) => CommandOutcome::Created(id),
                None => CommandOutcome::Ignored,
            },
            BuilderCommand::Undo => changed(self.store.undo()),
            BuilderCommand::Redo => changed(self.store.redo()),
            BuilderCommand::Save => {
                self.store.save_design(self.storage.as_ref()).await?;
                CommandOutcome::Applied
            }
            BuilderCommand::Load => {
                self.store.load_saved_design(self.storage.as_ref()).await?;
                CommandOutcome::Applied
            }
        };
        Ok(outcome)
    }

    /// Dispatch commands in order, stopping at the first failure.
    pub async fn replay(
        &mut self,
        commands: impl IntoIterator<Item = BuilderCommand>,
    ) -> StoreResult<Vec<CommandOutcome>> {
        let mut outcomes = Vec::new();
        for command in commands {
            outcomes.push(self.dispatch(command).await?);
        }
        Ok(outcomes)
    }

    /// Export the current design.
    pub fn export(&self, format: ExportFormat) -> Result<ExportArtifact, ExportError> {
        Ok(ExportArtifact {
            file_name: format.file_name().to_string(),
            contents: export_design(self.store.components(), format)?,
        })
    }

    /// Export the current design in every format.
    pub fn export_all(&self) -> Result<Vec<ExportArtifact>, ExportError> {
        ExportFormat::ALL
            .into_iter()
            .map(|format| self.export(format))
            .collect()
    }
}

fn changed(moved: bool) -> CommandOutcome {
    if moved {
        CommandOutcome::Applied
    } else {
        CommandOutcome::Ignored
    }
}
