//! Placed components and design snapshots.

use crate::error::StoreError;
use kurbo::Point;
use serde::{Deserialize, Serialize, Serializer, ser};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Free-form property bag of a placed component.
///
/// Keys are kind-specific and never validated by the store. The map is ordered
/// by key, which keeps every serialized form deterministic.
pub type Properties = serde_json::Map<String, Value>;

/// The closed set of component kinds the builder can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Heading,
    Paragraph,
    Button,
    Input,
    Image,
    Container,
    Row,
    Column,
    Card,
    Form,
    List,
    Map,
}

impl ComponentKind {
    /// All kinds, in component-library order.
    pub const ALL: [ComponentKind; 12] = [
        ComponentKind::Heading,
        ComponentKind::Paragraph,
        ComponentKind::Button,
        ComponentKind::Input,
        ComponentKind::Image,
        ComponentKind::Container,
        ComponentKind::Row,
        ComponentKind::Column,
        ComponentKind::Card,
        ComponentKind::Form,
        ComponentKind::List,
        ComponentKind::Map,
    ];

    /// The lowercase tag used in serialized designs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Heading => "heading",
            ComponentKind::Paragraph => "paragraph",
            ComponentKind::Button => "button",
            ComponentKind::Input => "input",
            ComponentKind::Image => "image",
            ComponentKind::Container => "container",
            ComponentKind::Row => "row",
            ComponentKind::Column => "column",
            ComponentKind::Card => "card",
            ComponentKind::Form => "form",
            ComponentKind::List => "list",
            ComponentKind::Map => "map",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = StoreError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| StoreError::InvalidKind(tag.to_string()))
    }
}

/// Unique identifier of a placed component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One component instance placed on the design surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedComponent {
    id: ComponentId,
    #[serde(rename = "type")]
    kind: ComponentKind,
    /// Top-left corner on the canvas, in pixels.
    #[serde(serialize_with = "serialize_position")]
    pub position: Point,
    /// Kind-specific properties.
    #[serde(rename = "props", default)]
    pub properties: Properties,
}

/// JSON has no NaN or infinity; refuse instead of writing `null`.
fn serialize_position<S: Serializer>(position: &Point, serializer: S) -> Result<S::Ok, S::Error> {
    if !position.is_finite() {
        return Err(ser::Error::custom(format!(
            "non-finite position ({}, {})",
            position.x, position.y
        )));
    }
    position.serialize(serializer)
}

impl PlacedComponent {
    /// Create a component with an empty property bag.
    pub fn new(id: ComponentId, kind: ComponentKind, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            properties: Properties::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Raw property lookup, without defaults.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Copy of this component under a new identity.
    pub(crate) fn cloned_as(&self, id: ComponentId, position: Point) -> Self {
        Self {
            id,
            kind: self.kind,
            position,
            properties: self.properties.clone(),
        }
    }
}

/// A pin on a map component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Marker {
    /// Read the markers of a map component's `markers` property.
    ///
    /// Entries that do not look like a marker are skipped. Each marker comes
    /// with its index in the raw list, which numbers untitled markers.
    pub fn list_from(value: Option<&Value>) -> Vec<(usize, Marker)> {
        let Some(Value::Array(entries)) = value else {
            return Vec::new();
        };
        entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match Marker::deserialize(entry) {
                Ok(marker) => Some((index, marker)),
                Err(e) => {
                    log::warn!("Skipping malformed marker #{}: {}", index, e);
                    None
                }
            })
            .collect()
    }

    /// Title shown for the marker, falling back to its 1-based position.
    pub fn display_title(&self, index: usize) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Marker {}", index + 1),
        }
    }
}

/// The complete ordered list of components at one point in time.
///
/// Components are shared between snapshots behind `Arc` and are copied on
/// write, so editing one snapshot never changes another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignSnapshot {
    components: Vec<Arc<PlacedComponent>>,
}

impl DesignSnapshot {
    /// Create an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components in list order (creation order, back to front).
    pub fn iter(&self) -> impl Iterator<Item = &PlacedComponent> {
        self.components.iter().map(|c| c.as_ref())
    }

    pub fn get(&self, id: &ComponentId) -> Option<&PlacedComponent> {
        self.iter().find(|c| c.id() == id)
    }

    /// Mutable access to a component, detaching it from other snapshots first.
    pub fn get_mut(&mut self, id: &ComponentId) -> Option<&mut PlacedComponent> {
        self.components
            .iter_mut()
            .find(|c| c.id() == id)
            .map(Arc::make_mut)
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.get(id).is_some()
    }

    /// Append a component at the end of the list.
    pub fn push(&mut self, component: PlacedComponent) {
        self.components.push(Arc::new(component));
    }

    /// Remove a component, returning it.
    pub fn remove(&mut self, id: &ComponentId) -> Option<PlacedComponent> {
        let index = self.components.iter().position(|c| c.id() == id)?;
        let removed = self.components.remove(index);
        Some(Arc::unwrap_or_clone(removed))
    }

    /// Ids in list order.
    pub fn ids(&self) -> impl Iterator<Item = &ComponentId> {
        self.iter().map(|c| c.id())
    }

    /// The first id that occurs more than once, if any.
    pub fn first_duplicate_id(&self) -> Option<&ComponentId> {
        let mut seen = HashSet::new();
        self.ids().find(|id| !seen.insert(*id))
    }

    /// Whether both snapshots hold the very same allocation for `id`.
    pub fn shares_component(&self, other: &DesignSnapshot, id: &ComponentId) -> bool {
        let find = |snapshot: &DesignSnapshot| {
            snapshot
                .components
                .iter()
                .find(|c| c.id() == id)
                .cloned()
        };
        match (find(self), find(other)) {
            (Some(a), Some(b)) => Arc::ptr_eq(&a, &b),
            _ => false,
        }
    }
}

impl FromIterator<PlacedComponent> for DesignSnapshot {
    fn from_iter<I: IntoIterator<Item = PlacedComponent>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn heading(id: &str) -> PlacedComponent {
        PlacedComponent::new(id.into(), ComponentKind::Heading, Point::new(10.0, 20.0))
    }

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in ComponentKind::ALL {
            assert_eq!(kind.as_str().parse::<ComponentKind>().unwrap(), kind);
        }
        assert!(matches!(
            "carousel".parse::<ComponentKind>(),
            Err(StoreError::InvalidKind(tag)) if tag == "carousel"
        ));
    }

    #[test]
    fn test_component_serializes_with_original_field_names() {
        let component = heading("a").with_property("text", "Hi");
        let value = serde_json::to_value(&component).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "a",
                "type": "heading",
                "position": { "x": 10.0, "y": 20.0 },
                "props": { "text": "Hi" }
            })
        );
    }

    #[test]
    fn test_missing_props_deserialize_as_empty() {
        let json = r#"{"id":"a","type":"button","position":{"x":1,"y":2}}"#;
        let component: PlacedComponent = serde_json::from_str(json).unwrap();
        assert_eq!(component.kind(), ComponentKind::Button);
        assert!(component.properties.is_empty());
    }

    #[test]
    fn test_snapshot_copy_on_write() {
        let mut first = DesignSnapshot::new();
        first.push(heading("a"));
        first.push(heading("b"));

        let mut second = first.clone();
        assert!(first.shares_component(&second, &"a".into()));

        second.get_mut(&"a".into()).unwrap().position = Point::new(0.0, 0.0);

        assert!(!first.shares_component(&second, &"a".into()));
        assert!(first.shares_component(&second, &"b".into()));
        assert_eq!(first.get(&"a".into()).unwrap().position, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_snapshot_remove_keeps_order() {
        let mut snapshot: DesignSnapshot = ["a", "b", "c"].into_iter().map(heading).collect();
        let removed = snapshot.remove(&"b".into()).unwrap();

        assert_eq!(removed.id().as_str(), "b");
        let ids: Vec<_> = snapshot.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(snapshot.remove(&"missing".into()).is_none());
    }

    #[test]
    fn test_non_finite_position_does_not_serialize() {
        let component = PlacedComponent::new("n".into(), ComponentKind::Heading, Point::new(f64::NAN, 5.0));
        assert!(serde_json::to_string(&component).is_err());

        let component = PlacedComponent::new("i".into(), ComponentKind::Heading, Point::new(0.0, f64::INFINITY));
        assert!(serde_json::to_string(&component).is_err());
    }

    #[test]
    fn test_first_duplicate_id() {
        let unique: DesignSnapshot = ["a", "b"].into_iter().map(heading).collect();
        assert!(unique.first_duplicate_id().is_none());

        let duplicated: DesignSnapshot = ["a", "b", "a"].into_iter().map(heading).collect();
        assert_eq!(duplicated.first_duplicate_id().unwrap().as_str(), "a");
    }

    #[test]
    fn test_markers_skip_malformed_entries() {
        let value = json!([
            { "lat": 1.0, "lng": 2.0, "title": "Office" },
            { "lat": "north" },
            { "lat": 3.0, "lng": 4.0 }
        ]);
        let markers = Marker::list_from(Some(&value));

        assert_eq!(markers.len(), 2);
        let (first_index, first) = &markers[0];
        assert_eq!(first.display_title(*first_index), "Office");
        let (second_index, second) = &markers[1];
        assert_eq!(*second_index, 2);
        assert_eq!(second.display_title(*second_index), "Marker 3");
        assert!(Marker::list_from(None).is_empty());
        assert!(Marker::list_from(Some(&json!("nope"))).is_empty());
    }
}
