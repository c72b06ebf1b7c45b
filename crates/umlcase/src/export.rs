//! Export functionality for use-case diagrams.
//!
//! This module provides the [`Exporter`] trait that turns a parsed
//! [`Diagram`] into an output document. It is the last, optional stage of
//! the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parse
//! Semantic Model
//!     ↓ export (this module)
//! Text / JSON
//! ```
//!
//! # Available Backends
//!
//! - [`text`] — indented listing via [`text::TextExporter`]
//! - [`json`] — serialized model via [`json::JsonExporter`]

pub mod json;
pub mod text;

use thiserror::Error;

use umlcase_core::semantic::Diagram;

use crate::config::{ExportConfig, ExportFormat};

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Exports a diagram to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the model cannot be serialized.
    fn export(&self, diagram: &Diagram) -> Result<String, Error>;
}

/// Errors that can occur during diagram export.
///
/// Converted into [`UseCaseError::Export`](crate::UseCaseError::Export)
/// at the crate boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Select the exporter for a configuration.
pub fn exporter(config: &ExportConfig) -> Box<dyn Exporter> {
    match config.format() {
        ExportFormat::Text => Box::new(text::TextExporter),
        ExportFormat::Json => Box::new(json::JsonExporter::new(config.pretty())),
    }
}
