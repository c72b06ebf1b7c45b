//! JSON export backend.
//!
//! The document is the serialized model: an object with `actors`,
//! `use_cases`, `relations` and `packages` arrays. Missing labels are
//! `null` and relation kinds are lowercase strings.

use umlcase_core::semantic::Diagram;

use super::{Error, Exporter};

/// Serialize a diagram, indented when `pretty` is set.
pub fn render(diagram: &Diagram, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(diagram)
    } else {
        serde_json::to_string(diagram)
    }
}

/// [`Exporter`] producing JSON.
#[derive(Debug, Clone, Copy)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, diagram: &Diagram) -> Result<String, Error> {
        Ok(render(diagram, self.pretty)?)
    }
}
