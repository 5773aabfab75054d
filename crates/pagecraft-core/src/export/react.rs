//! React component source export.

use super::{Writer, escape_html, js_number, js_string};
use crate::components::{ComponentKind, DesignSnapshot, Marker, PlacedComponent};
use crate::defaults::{RenderTarget, optional_text, resolve, resolve_number, resolve_text};
use serde_json::Value;

const TARGET: RenderTarget = RenderTarget::Export;

/// Render the snapshot as a single `ExportedDesign` React component.
pub fn to_react(snapshot: &DesignSnapshot) -> String {
    let maps: Vec<&PlacedComponent> = snapshot
        .iter()
        .filter(|c| c.kind() == ComponentKind::Map)
        .collect();

    let mut w = Writer::new();
    w.line("import React from \"react\";");
    if !maps.is_empty() {
        w.line("import { GoogleMap, LoadScript, Marker } from \"@react-google-maps/api\";");
    }
    w.blank();
    w.line("export default function ExportedDesign() {");
    w.indent();

    if let Some(first) = maps.first() {
        w.line(&format!(
            "const apiKey = {};",
            js_string(&resolve_text(first, "apiKey", TARGET))
        ));
        w.blank();
        for (index, component) in maps.iter().enumerate() {
            write_map_config(&mut w, component, index);
        }
    }

    w.line("return (");
    w.indent();
    w.line("<div className=\"relative w-full h-screen\">");
    w.indent();

    let mut map_index = 0;
    for component in snapshot.iter() {
        if component.kind() == ComponentKind::Map {
            write_map(&mut w, component, map_index);
            map_index += 1;
        } else {
            write_component(&mut w, component);
        }
    }

    w.dedent();
    w.line("</div>");
    w.dedent();
    w.line(");");
    w.dedent();
    w.line("}");
    w.finish()
}

/// Escape text placed between JSX tags.
fn jsx_text(text: &str) -> String {
    escape_html(text).replace('{', "&#123;").replace('}', "&#125;")
}

fn text(component: &PlacedComponent, key: &str) -> String {
    jsx_text(&resolve_text(component, key, TARGET))
}

/// Style-object value: numbers stay numeric (pixels), everything else is a string.
fn style_value(component: &PlacedComponent, key: &str) -> String {
    match resolve(component, key, TARGET) {
        Some(Value::Number(n)) => js_number(n.as_f64().unwrap_or_default()),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => js_number(n),
            _ => js_string(&s),
        },
        Some(other) => js_string(&other.to_string()),
        None => "undefined".to_string(),
    }
}

fn placement(component: &PlacedComponent) -> String {
    format!(
        "position: \"absolute\", left: {}, top: {}",
        js_number(component.position.x),
        js_number(component.position.y)
    )
}

fn write_component(w: &mut Writer, component: &PlacedComponent) {
    let place = placement(component);
    match component.kind() {
        ComponentKind::Heading => {
            w.line(&format!(
                "<h2 style={{{{ {}, fontSize: {}, color: {} }}}}>",
                place,
                style_value(component, "fontSize"),
                style_value(component, "color"),
            ));
            write_children(w, &text(component, "text"), "</h2>");
        }
        ComponentKind::Paragraph => {
            w.line(&format!(
                "<p style={{{{ {}, color: {} }}}}>",
                place,
                style_value(component, "color"),
            ));
            write_children(w, &text(component, "text"), "</p>");
        }
        ComponentKind::Button => {
            let class_name = if resolve_text(component, "variant", TARGET) == "outline" {
                "px-4 py-2 rounded-md border border-blue-500 text-blue-500"
            } else {
                "px-4 py-2 rounded-md bg-blue-500 text-white"
            };
            w.line("<button");
            w.indent();
            w.line(&format!("style={{{{ {} }}}}", place));
            w.line(&format!("className=\"{}\"", class_name));
            w.dedent();
            w.line(">");
            write_children(w, &text(component, "text"), "</button>");
        }
        ComponentKind::Input => {
            w.line("<input");
            w.indent();
            w.line("type=\"text\"");
            w.line(&format!("placeholder=\"{}\"", escape_html(&resolve_text(component, "placeholder", TARGET))));
            w.line(&format!(
                "style={{{{ {}, width: {} }}}}",
                place,
                style_value(component, "width"),
            ));
            w.line("className=\"border rounded-md px-3 py-2\"");
            w.dedent();
            w.line("/>");
        }
        ComponentKind::Image => {
            w.line("<img");
            w.indent();
            w.line(&format!("src=\"{}\"", escape_html(&resolve_text(component, "src", TARGET))));
            w.line(&format!("alt=\"{}\"", escape_html(&resolve_text(component, "alt", TARGET))));
            w.line(&format!(
                "style={{{{ {}, width: {}, height: {}, objectFit: \"cover\" }}}}",
                place,
                style_value(component, "width"),
                style_value(component, "height"),
            ));
            w.dedent();
            w.line("/>");
        }
        ComponentKind::Container => {
            w.line("<div");
            w.indent();
            w.line(&format!(
                "style={{{{ {}, width: {}, height: {}, backgroundColor: {} }}}}",
                place,
                style_value(component, "width"),
                style_value(component, "height"),
                style_value(component, "backgroundColor"),
            ));
            w.line("className=\"border rounded-md p-4\"");
            w.dedent();
            w.line(">");
            write_children(w, &text(component, "text"), "</div>");
        }
        ComponentKind::Card => write_card(w, component, &place),
        ComponentKind::Map => {}
        ComponentKind::Row | ComponentKind::Column | ComponentKind::Form | ComponentKind::List => {
            w.line(&format!(
                "<div data-component=\"{}\" style={{{{ {} }}}} />",
                component.kind(),
                place
            ));
        }
    }
}

fn write_children(w: &mut Writer, content: &str, closing: &str) {
    w.indent();
    w.line(content);
    w.dedent();
    w.line(closing);
}

fn write_card(w: &mut Writer, component: &PlacedComponent, place: &str) {
    w.line("<div");
    w.indent();
    w.line(&format!(
        "style={{{{ {}, width: {} }}}}",
        place,
        style_value(component, "width")
    ));
    w.line("className=\"border rounded-md shadow-sm bg-white overflow-hidden\"");
    w.dedent();
    w.line(">");
    w.indent();
    w.line("<div className=\"p-6 pb-3\">");
    w.indent();
    w.line(&format!(
        "<h3 className=\"text-xl font-bold mb-1\">{}</h3>",
        text(component, "title")
    ));
    if let Some(description) = optional_text(component, "description") {
        w.line(&format!(
            "<p className=\"text-gray-500 text-sm\">{}</p>",
            jsx_text(&description)
        ));
    }
    w.dedent();
    w.line("</div>");
    w.line(&format!(
        "<div className=\"px-6 pb-6\">{}</div>",
        text(component, "content")
    ));
    if let Some(footer) = optional_text(component, "footer") {
        w.line(&format!(
            "<div className=\"px-6 py-3 border-t\">{}</div>",
            jsx_text(&footer)
        ));
    }
    w.dedent();
    w.line("</div>");
}

fn write_map_config(w: &mut Writer, component: &PlacedComponent, index: usize) {
    let number = |key| js_number(resolve_number(component, key, TARGET).unwrap_or_default());
    w.line(&format!("const mapConfig{} = {{", index));
    w.indent();
    w.line(&format!("center: {{ lat: {}, lng: {} }},", number("lat"), number("lng")));
    w.line(&format!("zoom: {},", number("zoom")));
    w.line(&format!(
        "mapTypeId: {}",
        js_string(&resolve_text(component, "mapTypeId", TARGET))
    ));
    w.dedent();
    w.line("};");
    w.blank();
}

fn write_map(w: &mut Writer, component: &PlacedComponent, index: usize) {
    w.line(&format!("<div style={{{{ {} }}}}>", placement(component)));
    w.indent();
    w.line("<LoadScript googleMapsApiKey={apiKey}>");
    w.indent();
    w.line("<GoogleMap");
    w.indent();
    w.line(&format!(
        "mapContainerStyle={{{{ width: {}, height: {} }}}}",
        style_value(component, "width"),
        style_value(component, "height"),
    ));
    w.line(&format!("center={{mapConfig{}.center}}", index));
    w.line(&format!("zoom={{mapConfig{}.zoom}}", index));
    w.line(&format!("mapTypeId={{mapConfig{}.mapTypeId}}", index));
    w.dedent();
    w.line(">");
    w.indent();
    for (marker_index, marker) in Marker::list_from(component.prop("markers")) {
        w.line("<Marker");
        w.indent();
        w.line(&format!(
            "position={{{{ lat: {}, lng: {} }}}}",
            js_number(marker.lat),
            js_number(marker.lng)
        ));
        w.line(&format!("title={{{}}}", js_string(&marker.display_title(marker_index))));
        w.dedent();
        w.line("/>");
    }
    w.dedent();
    w.line("</GoogleMap>");
    w.dedent();
    w.line("</LoadScript>");
    w.dedent();
    w.line("</div>");
}
