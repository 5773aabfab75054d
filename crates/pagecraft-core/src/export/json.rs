//! JSON document form of a design.
//!
//! The document is the component list itself: an array of
//! `{ "id", "type", "position": { "x", "y" }, "props" }` objects. The same form
//! is used for export, for saved designs and for import.

use crate::components::DesignSnapshot;

/// Serialize a snapshot as a pretty-printed JSON array.
pub fn to_json(snapshot: &DesignSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

/// Parse a JSON array of components.
///
/// Unknown component types are rejected. Properties are accepted as-is.
pub fn from_json(source: &str) -> Result<DesignSnapshot, serde_json::Error> {
    serde_json::from_str(source)
}
