//! Input events accepted by an editing session.
//!
//! Commands are serde-tagged by `command`, so a list of them can be stored as a
//! JSON script and replayed:
//!
//! ```json
//! [
//!   { "command": "place", "kind": "heading", "position": { "x": 10, "y": 20 } },
//!   { "command": "set_properties", "id": "component-1", "props": { "text": "Hi" } },
//!   { "command": "undo" }
//! ]
//! ```

use kurbo::Point;
use pagecraft_core::{ComponentId, ComponentKind, Properties};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BuilderCommand {
    /// A palette item dropped on the canvas.
    Place { kind: ComponentKind, position: Point },
    /// A drag finished at `(x, y)`.
    Move { id: ComponentId, x: f64, y: f64 },
    /// An edit from the properties panel.
    SetProperties {
        id: ComponentId,
        #[serde(default)]
        props: Properties,
        #[serde(default)]
        position: Option<Point>,
    },
    /// Click on a component, or on empty canvas to clear.
    Select {
        #[serde(default)]
        id: Option<ComponentId>,
    },
    DeleteSelected,
    DuplicateSelected,
    Undo,
    Redo,
    Save,
    Load,
}

impl BuilderCommand {
    /// Parse a JSON array of commands.
    pub fn parse_script(source: &str) -> Result<Vec<BuilderCommand>, serde_json::Error> {
        serde_json::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_script() {
        let script = r#"[
            { "command": "place", "kind": "map", "position": { "x": 1, "y": 2 } },
            { "command": "move", "id": "a", "x": 5, "y": 6 },
            { "command": "set_properties", "id": "a", "props": { "zoom": 4 } },
            { "command": "select" },
            { "command": "duplicate_selected" },
            { "command": "undo" }
        ]"#;
        let commands = BuilderCommand::parse_script(script).unwrap();

        assert_eq!(
            commands[0],
            BuilderCommand::Place {
                kind: ComponentKind::Map,
                position: Point::new(1.0, 2.0)
            }
        );
        assert_eq!(
            commands[1],
            BuilderCommand::Move {
                id: "a".into(),
                x: 5.0,
                y: 6.0
            }
        );
        match &commands[2] {
            BuilderCommand::SetProperties { id, props, position } => {
                assert_eq!(id.as_str(), "a");
                assert_eq!(props.get("zoom"), Some(&json!(4)));
                assert!(position.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(commands[3], BuilderCommand::Select { id: None });
        assert_eq!(commands[4], BuilderCommand::DuplicateSelected);
        assert_eq!(commands[5], BuilderCommand::Undo);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let script = r#"[{ "command": "place", "kind": "carousel", "position": { "x": 0, "y": 0 } }]"#;
        assert!(BuilderCommand::parse_script(script).is_err());
    }

    #[test]
    fn test_serialized_tag() {
        let value = serde_json::to_value(BuilderCommand::DeleteSelected).unwrap();
        assert_eq!(value, json!({ "command": "delete_selected" }));
    }
}
