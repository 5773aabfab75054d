//! Pagecraft Core Library
//!
//! Platform-agnostic state core for the Pagecraft page builder: the component
//! store with linear undo/redo history, and the exporters that turn a design
//! into HTML, React source or JSON.

pub mod components;
pub mod defaults;
pub mod error;
pub mod export;
pub mod history;
pub mod ids;
pub mod storage;
pub mod store;

pub use components::{ComponentId, ComponentKind, DesignSnapshot, Marker, PlacedComponent, Properties};
pub use defaults::RenderTarget;
pub use error::{StoreError, StoreResult};
pub use export::{ExportError, ExportFormat, export_design};
pub use history::HistoryLog;
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use store::{ComponentStore, SharedComponentStore, DUPLICATE_OFFSET, SAVED_DESIGN_KEY, check_position};
