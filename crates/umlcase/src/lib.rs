//! umlcase - parse PlantUML use-case diagrams into a structured model.
//!
//! Parsing is delegated to [`umlcase_parser`]; this crate adds
//! configuration and exporters that turn the model into text or JSON.

pub mod config;
pub mod export;

mod error;

pub use umlcase_core::{identifier, semantic};

pub use error::UseCaseError;

use log::{debug, info, trace};

use config::AppConfig;

/// Builder for parsing and exporting use-case diagrams.
///
/// # Examples
///
/// ```
/// use umlcase::{DiagramBuilder, config::AppConfig};
///
/// let source = "@startuml\nactor User\nusecase Login\nUser --> Login\n@enduml";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// let diagram = builder.parse(source).expect("Failed to parse");
/// let text = builder.export(&diagram).expect("Failed to export");
///
/// assert!(text.starts_with("Actors:\n  User\n"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the builder's configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into a semantic diagram.
    ///
    /// # Errors
    ///
    /// Returns [`UseCaseError::Parse`] with the source attached when the
    /// text is not a valid diagram.
    ///
    /// # Examples
    ///
    /// ```
    /// use umlcase::DiagramBuilder;
    ///
    /// let builder = DiagramBuilder::default();
    /// let diagram = builder
    ///     .parse("@startuml\nactor User as :Customer:\n@enduml")
    ///     .expect("Failed to parse diagram");
    ///
    /// assert_eq!(diagram.actors()[0].label(), Some("Customer"));
    /// ```
    pub fn parse(&self, source: &str) -> Result<semantic::Diagram, UseCaseError> {
        info!("Parsing diagram");

        let diagram = umlcase_parser::parse(source)
            .map_err(|err| UseCaseError::new_parse_error(err, source))?;

        debug!(elements = diagram.element_count(); "Diagram parsed successfully");
        trace!(diagram:?; "Parsed diagram");

        Ok(diagram)
    }

    /// Export a semantic diagram in the configured format.
    ///
    /// # Errors
    ///
    /// Returns [`UseCaseError::Export`] if serialization fails.
    pub fn export(&self, diagram: &semantic::Diagram) -> Result<String, UseCaseError> {
        let format = self.config.export().format();
        info!(format:% = format; "Exporting diagram");

        let output = export::exporter(self.config.export()).export(diagram)?;

        debug!(bytes = output.len(); "Diagram exported");
        Ok(output)
    }
}
