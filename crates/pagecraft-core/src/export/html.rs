//! Standalone HTML document export.

use super::{Writer, escape_html, js_number, js_string};
use crate::components::{ComponentKind, DesignSnapshot, Marker, PlacedComponent};
use crate::defaults::{
    MAP_API_KEY_PLACEHOLDER, RenderTarget, display_value, optional_text, resolve, resolve_number,
    resolve_text,
};
use serde_json::Value;

const TARGET: RenderTarget = RenderTarget::Export;

/// Render the snapshot as a standalone HTML page with absolutely positioned elements.
pub fn to_html(snapshot: &DesignSnapshot) -> String {
    let maps: Vec<&PlacedComponent> = snapshot
        .iter()
        .filter(|c| c.kind() == ComponentKind::Map)
        .collect();

    let mut w = Writer::new();
    w.line("<!DOCTYPE html>");
    w.line("<html lang=\"en\">");
    w.line("<head>");
    w.indent();
    w.line("<meta charset=\"UTF-8\">");
    w.line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    w.line("<title>Exported Design</title>");
    w.line("<style>");
    w.indent();
    w.line("body { margin: 0; font-family: sans-serif; }");
    w.line(".design-container { position: relative; width: 100%; height: 100vh; }");
    w.dedent();
    w.line("</style>");
    if !maps.is_empty() {
        write_maps_script(&mut w, &maps);
    }
    w.dedent();
    w.line("</head>");

    if maps.is_empty() {
        w.line("<body>");
    } else {
        w.line("<body onload=\"initMaps()\">");
    }
    w.indent();
    w.line("<div class=\"design-container\">");
    w.indent();

    let mut map_index = 0;
    for component in snapshot.iter() {
        if component.kind() == ComponentKind::Map {
            write_map_container(&mut w, component, map_index);
            map_index += 1;
        } else {
            write_component(&mut w, component);
        }
    }

    w.dedent();
    w.line("</div>");
    w.dedent();
    w.line("</body>");
    w.line("</html>");
    w.finish()
}

/// `position: absolute; left: Xpx; top: Ypx;` prefix shared by every element.
fn placement(component: &PlacedComponent) -> String {
    format!(
        "position: absolute; left: {}px; top: {}px;",
        js_number(component.position.x),
        js_number(component.position.y)
    )
}

/// CSS length for a size property: bare numbers are pixels, other strings pass through.
fn css_length(component: &PlacedComponent, key: &str) -> String {
    match resolve(component, key, TARGET) {
        Some(Value::Number(n)) => format!("{}px", display_value(&Value::Number(n))),
        Some(Value::String(s)) if s.trim().parse::<f64>().is_ok() => format!("{}px", s.trim()),
        Some(other) => display_value(&other),
        None => String::new(),
    }
}

fn text(component: &PlacedComponent, key: &str) -> String {
    escape_html(&resolve_text(component, key, TARGET))
}

fn write_component(w: &mut Writer, component: &PlacedComponent) {
    let place = placement(component);
    match component.kind() {
        ComponentKind::Heading => w.line(&format!(
            "<h2 style=\"{} font-size: {}; color: {};\">{}</h2>",
            place,
            text(component, "fontSize"),
            text(component, "color"),
            text(component, "text"),
        )),
        ComponentKind::Paragraph => w.line(&format!(
            "<p style=\"{} color: {};\">{}</p>",
            place,
            text(component, "color"),
            text(component, "text"),
        )),
        ComponentKind::Button => {
            let look = if resolve_text(component, "variant", TARGET) == "outline" {
                "border: 1px solid #3b82f6; color: #3b82f6; background: transparent;"
            } else {
                "background-color: #3b82f6; color: white; border: none;"
            };
            w.line(&format!(
                "<button style=\"{} padding: 0.5rem 1rem; border-radius: 0.375rem; {}\">{}</button>",
                place,
                look,
                text(component, "text"),
            ));
        }
        ComponentKind::Input => w.line(&format!(
            "<input type=\"text\" placeholder=\"{}\" style=\"{} padding: 0.5rem; border: 1px solid #d1d5db; border-radius: 0.375rem; width: {};\">",
            text(component, "placeholder"),
            place,
            escape_html(&css_length(component, "width")),
        )),
        ComponentKind::Image => w.line(&format!(
            "<img src=\"{}\" alt=\"{}\" style=\"{} width: {}; height: {}; object-fit: cover;\">",
            text(component, "src"),
            text(component, "alt"),
            place,
            escape_html(&css_length(component, "width")),
            escape_html(&css_length(component, "height")),
        )),
        ComponentKind::Container => w.line(&format!(
            "<div style=\"{} width: {}; height: {}; background-color: {}; border: 1px solid #e2e8f0; border-radius: 0.375rem; padding: 1rem;\">{}</div>",
            place,
            escape_html(&css_length(component, "width")),
            escape_html(&css_length(component, "height")),
            text(component, "backgroundColor"),
            text(component, "text"),
        )),
        ComponentKind::Card => write_card(w, component, &place),
        ComponentKind::Map => {}
        ComponentKind::Row | ComponentKind::Column | ComponentKind::Form | ComponentKind::List => {
            w.line(&format!(
                "<div data-component=\"{}\" style=\"{}\"></div>",
                component.kind(),
                place
            ))
        }
    }
}

fn write_card(w: &mut Writer, component: &PlacedComponent, place: &str) {
    w.line(&format!(
        "<div style=\"{} width: {}; border: 1px solid #e2e8f0; border-radius: 0.375rem; background-color: white; box-shadow: 0 1px 3px 0 rgba(0, 0, 0, 0.1), 0 1px 2px 0 rgba(0, 0, 0, 0.06); overflow: hidden;\">",
        place,
        escape_html(&css_length(component, "width")),
    ));
    w.indent();
    w.line("<div style=\"padding: 1.5rem 1.5rem 0.75rem;\">");
    w.indent();
    w.line(&format!(
        "<h3 style=\"font-size: 1.25rem; font-weight: bold; margin-bottom: 0.25rem;\">{}</h3>",
        text(component, "title")
    ));
    if let Some(description) = optional_text(component, "description") {
        w.line(&format!(
            "<p style=\"color: #6b7280; font-size: 0.875rem;\">{}</p>",
            escape_html(&description)
        ));
    }
    w.dedent();
    w.line("</div>");
    w.line(&format!(
        "<div style=\"padding: 0 1.5rem 1.5rem;\">{}</div>",
        text(component, "content")
    ));
    if let Some(footer) = optional_text(component, "footer") {
        w.line(&format!(
            "<div style=\"padding: 0.75rem 1.5rem; border-top: 1px solid #e2e8f0;\">{}</div>",
            escape_html(&footer)
        ));
    }
    w.dedent();
    w.line("</div>");
}

fn write_map_container(w: &mut Writer, component: &PlacedComponent, index: usize) {
    w.line(&format!(
        "<div id=\"map-{}\" style=\"{} width: {}; height: {}; border-radius: 0.375rem; overflow: hidden;\"></div>",
        index,
        placement(component),
        escape_html(&css_length(component, "width")),
        escape_html(&css_length(component, "height")),
    ));
}

/// Google Maps loader plus an `initMaps` function creating every map and its markers.
fn write_maps_script(w: &mut Writer, maps: &[&PlacedComponent]) {
    // One script tag serves every map, keyed by the first map's settings.
    let api_key = maps
        .first()
        .map(|c| resolve_text(c, "apiKey", TARGET))
        .unwrap_or_else(|| MAP_API_KEY_PLACEHOLDER.to_string());

    w.line(&format!(
        "<script src=\"https://maps.googleapis.com/maps/api/js?key={}\"></script>",
        escape_html(&api_key)
    ));
    w.line("<script>");
    w.indent();
    w.line("function initMaps() {");
    w.indent();
    for (index, component) in maps.iter().enumerate() {
        let number = |key| js_number(resolve_number(component, key, TARGET).unwrap_or_default());
        w.line(&format!(
            "const map{} = new google.maps.Map(document.getElementById(\"map-{}\"), {{",
            index, index
        ));
        w.indent();
        w.line(&format!("center: {{ lat: {}, lng: {} }},", number("lat"), number("lng")));
        w.line(&format!("zoom: {},", number("zoom")));
        w.line(&format!(
            "mapTypeId: {}",
            js_string(&resolve_text(component, "mapTypeId", TARGET))
        ));
        w.dedent();
        w.line("});");

        for (marker_index, marker) in Marker::list_from(component.prop("markers")) {
            w.line("new google.maps.Marker({");
            w.indent();
            w.line(&format!(
                "position: {{ lat: {}, lng: {} }},",
                js_number(marker.lat),
                js_number(marker.lng)
            ));
            w.line(&format!("map: map{},", index));
            w.line(&format!("title: {}", js_string(&marker.display_title(marker_index))));
            w.dedent();
            w.line("});");
        }
        w.blank();
    }
    w.dedent();
    w.line("}");
    w.dedent();
    w.line("</script>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use serde_json::json;

    fn place(kind: ComponentKind, x: f64, y: f64) -> PlacedComponent {
        PlacedComponent::new(format!("{}-id", kind).into(), kind, Point::new(x, y))
    }

    fn single(component: PlacedComponent) -> String {
        to_html(&std::iter::once(component).collect())
    }

    #[test]
    fn test_empty_design() {
        let html = to_html(&DesignSnapshot::new());

        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n"));
        assert!(html.contains("  <title>Exported Design</title>\n"));
        assert!(html.contains("<body>\n  <div class=\"design-container\">\n  </div>\n</body>\n</html>\n"));
        assert!(!html.contains("maps.googleapis.com"));
    }

    #[test]
    fn test_heading_with_defaults() {
        let html = single(place(ComponentKind::Heading, 10.0, 20.0));

        assert!(html.contains(
            "    <h2 style=\"position: absolute; left: 10px; top: 20px; font-size: 1.5rem; color: inherit;\">Heading</h2>\n"
        ));
    }

    #[test]
    fn test_properties_override_defaults_and_are_escaped() {
        let html = single(
            place(ComponentKind::Paragraph, 1.5, 2.0)
                .with_property("text", "Fish & <Chips>")
                .with_property("color", "red"),
        );

        assert!(html.contains(
            "<p style=\"position: absolute; left: 1.5px; top: 2px; color: red;\">Fish &amp; &lt;Chips&gt;</p>"
        ));
    }

    #[test]
    fn test_button_variants() {
        let solid = single(place(ComponentKind::Button, 0.0, 0.0));
        assert!(solid.contains("background-color: #3b82f6; color: white; border: none;\">Button</button>"));

        let outline = single(place(ComponentKind::Button, 0.0, 0.0).with_property("variant", "outline"));
        assert!(outline.contains("border: 1px solid #3b82f6; color: #3b82f6; background: transparent;"));
    }

    #[test]
    fn test_sized_elements() {
        let input = single(place(ComponentKind::Input, 0.0, 0.0));
        assert!(input.contains("placeholder=\"Input placeholder\""));
        assert!(input.contains("width: 200px;"));

        let image = single(place(ComponentKind::Image, 0.0, 0.0).with_property("width", "50%"));
        assert!(image.contains("<img src=\"/placeholder.svg\" alt=\"Image\""));
        assert!(image.contains("width: 50%; height: 200px; object-fit: cover;"));

        let container = single(place(ComponentKind::Container, 0.0, 0.0));
        assert!(container.contains("width: 300px; height: 200px; background-color: transparent;"));
        assert!(container.contains(">Container</div>"));
    }

    #[test]
    fn test_card_optional_sections() {
        let plain = single(place(ComponentKind::Card, 0.0, 0.0));
        assert!(plain.contains(">Card Title</h3>"));
        assert!(plain.contains(">Card content goes here</div>"));
        assert!(plain.contains("width: 350px;"));
        assert!(!plain.contains("border-top"));

        let full = single(
            place(ComponentKind::Card, 0.0, 0.0)
                .with_property("description", "Monthly")
                .with_property("footer", "Cancel anytime"),
        );
        assert!(full.contains("font-size: 0.875rem;\">Monthly</p>"));
        assert!(full.contains("border-top: 1px solid #e2e8f0;\">Cancel anytime</div>"));
    }

    #[test]
    fn test_layout_kinds_emit_placeholder_element() {
        let html = single(place(ComponentKind::List, 3.0, 4.0));
        assert!(html.contains(
            "<div data-component=\"list\" style=\"position: absolute; left: 3px; top: 4px;\"></div>"
        ));
    }

    #[test]
    fn test_maps_script_and_markers() {
        let snapshot: DesignSnapshot = vec![
            place(ComponentKind::Map, 0.0, 0.0)
                .with_property("apiKey", "KEY123")
                .with_property(
                    "markers",
                    json!([{ "lat": 1.5, "lng": 2.5, "title": "HQ" }, { "lat": 3.0, "lng": 4.0 }]),
                ),
            place(ComponentKind::Heading, 0.0, 0.0),
            PlacedComponent::new("second".into(), ComponentKind::Map, Point::new(50.0, 60.0))
                .with_property("zoom", 3),
        ]
        .into_iter()
        .collect();
        let html = to_html(&snapshot);

        assert!(html.contains("<script src=\"https://maps.googleapis.com/maps/api/js?key=KEY123\"></script>"));
        assert!(html.contains("<body onload=\"initMaps()\">"));
        assert!(html.contains("const map0 = new google.maps.Map(document.getElementById(\"map-0\"), {"));
        assert!(html.contains("center: { lat: 40.7128, lng: -74.006 },"));
        assert!(html.contains("mapTypeId: \"roadmap\""));
        assert!(html.contains("position: { lat: 1.5, lng: 2.5 },"));
        assert!(html.contains("title: \"HQ\""));
        assert!(html.contains("title: \"Marker 2\""));
        assert!(html.contains("zoom: 3,"));
        assert!(html.contains("<div id=\"map-0\" style=\"position: absolute; left: 0px; top: 0px; width: 400px; height: 300px;"));
        assert!(html.contains("<div id=\"map-1\" style=\"position: absolute; left: 50px; top: 60px;"));
    }

    #[test]
    fn test_untitled_markers_are_numbered_by_list_position() {
        let html = single(
            place(ComponentKind::Map, 0.0, 0.0)
                .with_property("markers", json!([{ "lat": "x" }, { "lat": 1.0, "lng": 2.0 }])),
        );
        assert!(html.contains("title: \"Marker 2\""));
        assert!(!html.contains("title: \"Marker 1\""));
    }
}
