//! Store errors.

use crate::components::ComponentId;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors reported by [`ComponentStore`](crate::store::ComponentStore) operations.
///
/// A failed operation never touches the design or its history.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Component not found: {0}")]
    NotFound(ComponentId),
    #[error("Unknown component kind: {0}")]
    InvalidKind(String),
    #[error("Position must be finite, got ({0}, {1})")]
    InvalidPosition(f64, f64),
    #[error("Duplicate component id in design: {0}")]
    DuplicateId(ComponentId),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Component store lock poisoned")]
    LockPoisoned,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
