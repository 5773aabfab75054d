//! Pagecraft application shell.
//!
//! Turns input events into store operations and store state into export
//! artifacts. Rendering and gesture capture live outside this crate.

pub mod command;
pub mod session;

pub use command::BuilderCommand;
pub use session::{CommandOutcome, ExportArtifact, Session};
