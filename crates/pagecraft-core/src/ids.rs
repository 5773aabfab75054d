//! Identifier generation for placed components.

use crate::components::ComponentId;
use uuid::Uuid;

/// Source of fresh component identifiers.
///
/// The store re-draws when a generated id already exists in the current
/// design, so generators only need to avoid repeating themselves.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> ComponentId;
}

/// Random v4 UUIDs. The default for editing sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> ComponentId {
        ComponentId::new(Uuid::new_v4().to_string())
    }
}

/// Sequential ids of the form `<prefix>-<n>`, starting at 1.
///
/// Deterministic, which makes exported documents reproducible.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    count: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            count: 0,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("component")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ComponentId {
        self.count += 1;
        ComponentId::new(format!("{}-{}", self.prefix, self.count))
    }
}
