//! Per-kind property defaults.
//!
//! Exporters and live rendering share one defaulting policy: a property that is
//! missing, `null`, `false`, `0`, NaN or an empty string is replaced by the
//! documented default for its kind. Values of any other shape are passed through
//! untouched; the store never validates property contents.

use crate::components::{ComponentKind, PlacedComponent, Properties};
use serde_json::Value;

/// Where a component is being rendered.
///
/// A few defaults differ between the editing canvas and exported documents
/// (a container fills its parent on the canvas but has a fixed size once
/// exported).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderTarget {
    #[default]
    Export,
    Canvas,
}

/// Default fallback for a single property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fallback {
    Text(&'static str),
    Number(f64),
    EmptyList,
}

impl Fallback {
    pub fn to_value(self) -> Value {
        match self {
            Fallback::Text(text) => Value::from(text),
            Fallback::Number(n) => Value::from(n),
            Fallback::EmptyList => Value::Array(Vec::new()),
        }
    }
}

/// Default image shown until a source is set.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Placeholder used by the maps script when no key has been configured.
pub const MAP_API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY";

const HEADING: &[(&str, Fallback)] = &[
    ("text", Fallback::Text("Heading")),
    ("fontSize", Fallback::Text("1.5rem")),
    ("color", Fallback::Text("inherit")),
];

const PARAGRAPH: &[(&str, Fallback)] = &[
    ("text", Fallback::Text("Paragraph text goes here")),
    ("color", Fallback::Text("inherit")),
];

const BUTTON: &[(&str, Fallback)] = &[
    ("text", Fallback::Text("Button")),
    ("variant", Fallback::Text("default")),
    ("size", Fallback::Text("default")),
];

const INPUT: &[(&str, Fallback)] = &[
    ("placeholder", Fallback::Text("Input placeholder")),
    ("width", Fallback::Number(200.0)),
];

const IMAGE_EXPORT: &[(&str, Fallback)] = &[
    ("src", Fallback::Text(PLACEHOLDER_IMAGE)),
    ("alt", Fallback::Text("Image")),
    ("width", Fallback::Number(300.0)),
    ("height", Fallback::Number(200.0)),
];

const IMAGE_CANVAS: &[(&str, Fallback)] = &[
    ("src", Fallback::Text("/placeholder.svg?height=200&width=300")),
    ("alt", Fallback::Text("Image")),
    ("width", Fallback::Number(300.0)),
    ("height", Fallback::Number(200.0)),
];

const CONTAINER_EXPORT: &[(&str, Fallback)] = &[
    ("text", Fallback::Text("Container")),
    ("backgroundColor", Fallback::Text("transparent")),
    ("width", Fallback::Number(300.0)),
    ("height", Fallback::Number(200.0)),
];

const CONTAINER_CANVAS: &[(&str, Fallback)] = &[
    ("text", Fallback::Text("Container")),
    ("backgroundColor", Fallback::Text("transparent")),
    ("width", Fallback::Text("100%")),
    ("height", Fallback::Text("auto")),
];

const CARD: &[(&str, Fallback)] = &[
    ("title", Fallback::Text("Card Title")),
    ("content", Fallback::Text("Card content goes here")),
    ("width", Fallback::Number(350.0)),
];

const MAP: &[(&str, Fallback)] = &[
    ("lat", Fallback::Number(40.7128)),
    ("lng", Fallback::Number(-74.006)),
    ("zoom", Fallback::Number(12.0)),
    ("mapTypeId", Fallback::Text("roadmap")),
    ("width", Fallback::Number(400.0)),
    ("height", Fallback::Number(300.0)),
    ("markers", Fallback::EmptyList),
    ("apiKey", Fallback::Text(MAP_API_KEY_PLACEHOLDER)),
];

/// The default table for a kind. Layout kinds (row, column, form, list) have none.
pub fn defaults_for(kind: ComponentKind, target: RenderTarget) -> &'static [(&'static str, Fallback)] {
    match (kind, target) {
        (ComponentKind::Heading, _) => HEADING,
        (ComponentKind::Paragraph, _) => PARAGRAPH,
        (ComponentKind::Button, _) => BUTTON,
        (ComponentKind::Input, _) => INPUT,
        (ComponentKind::Image, RenderTarget::Export) => IMAGE_EXPORT,
        (ComponentKind::Image, RenderTarget::Canvas) => IMAGE_CANVAS,
        (ComponentKind::Container, RenderTarget::Export) => CONTAINER_EXPORT,
        (ComponentKind::Container, RenderTarget::Canvas) => CONTAINER_CANVAS,
        (ComponentKind::Card, _) => CARD,
        (ComponentKind::Map, _) => MAP,
        (ComponentKind::Row | ComponentKind::Column | ComponentKind::Form | ComponentKind::List, _) => &[],
    }
}

/// Default for one key, if the kind documents one.
pub fn fallback(kind: ComponentKind, key: &str, target: RenderTarget) -> Option<Fallback> {
    defaults_for(kind, target)
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, fallback)| *fallback)
}

/// Whether a property counts as unset.
pub fn is_unset(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Some(Value::Array(_) | Value::Object(_)) => false,
    }
}

/// The effective value of a property: the stored one when set, else the default.
pub fn resolve(component: &PlacedComponent, key: &str, target: RenderTarget) -> Option<Value> {
    let stored = component.prop(key);
    if !is_unset(stored) {
        return stored.cloned();
    }
    fallback(component.kind(), key, target).map(Fallback::to_value)
}

/// The effective value rendered as text. Unknown keys without a value render empty.
pub fn resolve_text(component: &PlacedComponent, key: &str, target: RenderTarget) -> String {
    resolve(component, key, target)
        .map(|v| display_value(&v))
        .unwrap_or_default()
}

/// The effective value as a number, for contexts that need a numeric literal.
///
/// Numeric strings are parsed; anything else falls back to the documented
/// numeric default.
pub fn resolve_number(component: &PlacedComponent, key: &str, target: RenderTarget) -> Option<f64> {
    let parsed = match resolve(component, key, target)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    };
    parsed.or_else(|| match fallback(component.kind(), key, target)? {
        Fallback::Number(n) => Some(n),
        _ => None,
    })
}

/// Optional property that has no default (card description, card footer).
pub fn optional_text(component: &PlacedComponent, key: &str) -> Option<String> {
    let stored = component.prop(key);
    if is_unset(stored) {
        None
    } else {
        stored.map(display_value)
    }
}

/// All properties of a component with defaults filled in.
pub fn resolved_properties(component: &PlacedComponent, target: RenderTarget) -> Properties {
    let mut resolved = component.properties.clone();
    for (key, fallback) in defaults_for(component.kind(), target) {
        if is_unset(resolved.get(*key)) {
            resolved.insert((*key).to_string(), fallback.to_value());
        }
    }
    resolved
}

/// Render a JSON value the way it reads inside generated markup.
///
/// Integral numbers print without a fractional part, strings print raw.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(|f| f.to_string()).unwrap_or_default()
            }
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use serde_json::json;

    fn component(kind: ComponentKind) -> PlacedComponent {
        PlacedComponent::new("c".into(), kind, Point::ZERO)
    }

    #[test]
    fn test_missing_properties_use_defaults() {
        let heading = component(ComponentKind::Heading);
        assert_eq!(resolve_text(&heading, "text", RenderTarget::Export), "Heading");
        assert_eq!(resolve_text(&heading, "fontSize", RenderTarget::Export), "1.5rem");
        assert_eq!(resolve_text(&heading, "color", RenderTarget::Export), "inherit");

        let map = component(ComponentKind::Map);
        assert_eq!(resolve_text(&map, "lat", RenderTarget::Export), "40.7128");
        assert_eq!(resolve_text(&map, "lng", RenderTarget::Export), "-74.006");
        assert_eq!(resolve_text(&map, "zoom", RenderTarget::Export), "12");
        assert_eq!(resolve(&map, "markers", RenderTarget::Export), Some(json!([])));
    }

    #[test]
    fn test_falsy_values_fall_back() {
        let input = component(ComponentKind::Input)
            .with_property("placeholder", "")
            .with_property("width", 0);
        assert_eq!(resolve_text(&input, "placeholder", RenderTarget::Export), "Input placeholder");
        assert_eq!(resolve_text(&input, "width", RenderTarget::Export), "200");
    }

    #[test]
    fn test_set_values_win() {
        let button = component(ComponentKind::Button)
            .with_property("text", "Buy")
            .with_property("variant", "outline");
        assert_eq!(resolve_text(&button, "text", RenderTarget::Export), "Buy");
        assert_eq!(resolve_text(&button, "variant", RenderTarget::Export), "outline");
        assert_eq!(resolve_text(&button, "size", RenderTarget::Export), "default");
    }

    #[test]
    fn test_canvas_target_defaults() {
        let container = component(ComponentKind::Container);
        assert_eq!(resolve_text(&container, "width", RenderTarget::Canvas), "100%");
        assert_eq!(resolve_text(&container, "height", RenderTarget::Canvas), "auto");
        assert_eq!(resolve_text(&container, "width", RenderTarget::Export), "300");

        let image = component(ComponentKind::Image);
        assert_eq!(
            resolve_text(&image, "src", RenderTarget::Canvas),
            "/placeholder.svg?height=200&width=300"
        );
        assert_eq!(resolve_text(&image, "src", RenderTarget::Export), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_resolved_properties_keeps_unknown_keys() {
        let card = component(ComponentKind::Card)
            .with_property("title", "Pricing")
            .with_property("footer", "Billed yearly");
        let props = resolved_properties(&card, RenderTarget::Export);

        assert_eq!(props["title"], json!("Pricing"));
        assert_eq!(props["content"], json!("Card content goes here"));
        assert_eq!(props["footer"], json!("Billed yearly"));
        assert_eq!(optional_text(&card, "footer").as_deref(), Some("Billed yearly"));
        assert_eq!(optional_text(&card, "description"), None);
    }

    #[test]
    fn test_resolve_number() {
        let map = component(ComponentKind::Map)
            .with_property("lat", "51.5")
            .with_property("lng", "west");
        assert_eq!(resolve_number(&map, "lat", RenderTarget::Export), Some(51.5));
        assert_eq!(resolve_number(&map, "lng", RenderTarget::Export), Some(-74.006));
        assert_eq!(resolve_number(&map, "zoom", RenderTarget::Export), Some(12.0));
        assert_eq!(resolve_number(&map, "mapTypeId", RenderTarget::Export), None);
    }

    #[test]
    fn test_layout_kinds_have_no_defaults() {
        for kind in [ComponentKind::Row, ComponentKind::Column, ComponentKind::Form, ComponentKind::List] {
            assert!(defaults_for(kind, RenderTarget::Export).is_empty());
        }
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!(10.0)), "10");
        assert_eq!(display_value(&json!(10.5)), "10.5");
        assert_eq!(display_value(&json!(-3)), "-3");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!("x")), "x");
    }
}
