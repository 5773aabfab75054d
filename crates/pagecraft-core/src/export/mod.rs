//! Export of a design to HTML, React source or JSON.
//!
//! Every exporter is a pure function of the snapshot: components are visited in
//! list order and the same snapshot always produces byte-identical text.

pub mod html;
pub mod json;
pub mod react;

use crate::components::DesignSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

/// The three export artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    React,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Html, ExportFormat::React, ExportFormat::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::React => "react",
            ExportFormat::Json => "json",
        }
    }

    /// File extension of the artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::React => "jsx",
            ExportFormat::Json => "json",
        }
    }

    /// Default download name of the artifact.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Html => "exported-design.html",
            ExportFormat::React => "ExportedDesign.jsx",
            ExportFormat::Json => "exported-design.json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s || format.extension() == s)
            .ok_or_else(|| ExportError::UnknownFormat(s.to_string()))
    }
}

/// Export a snapshot in the given format.
pub fn export_design(snapshot: &DesignSnapshot, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Html => Ok(html::to_html(snapshot)),
        ExportFormat::React => Ok(react::to_react(snapshot)),
        ExportFormat::Json => Ok(json::to_json(snapshot)?),
    }
}

/// Indentation-aware line buffer shared by the text exporters.
pub(crate) struct Writer {
    depth: usize,
    buffer: String,
}

impl Writer {
    const INDENT: &'static str = "  ";

    pub(crate) fn new() -> Self {
        Self {
            depth: 0,
            buffer: String::new(),
        }
    }

    pub(crate) fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str(Self::INDENT);
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.buffer.push('\n');
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn finish(self) -> String {
        self.buffer
    }
}

/// Escape text for HTML element content and quoted attribute values.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Double-quoted JavaScript string literal, safe inside a `<script>` element.
pub(crate) fn js_string(text: &str) -> String {
    serde_json::Value::from(text).to_string().replace("</", "<\\/")
}

/// Format a coordinate or size the way JavaScript prints numbers.
pub(crate) fn js_number(n: f64) -> String {
    if n.is_finite() {
        n.to_string()
    } else {
        "0".to_string()
    }
}
