//! Configuration types for umlcase exports.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! TOML by the CLI. Every field has a default, so an empty file is a valid
//! configuration.
//!
//! # Example
//!
//! ```
//! # use umlcase::config::{AppConfig, ExportFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.export().format(), ExportFormat::Text);
//! assert!(config.export().pretty());
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given export settings.
    pub fn new(export: ExportConfig) -> Self {
        Self { export }
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Replaces the configured export format.
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.export.format = format;
        self
    }
}

/// Output formats for an exported diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Indented, human-readable listing.
    #[default]
    Text,
    /// The serialized model.
    Json,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format `{other}`")),
        }
    }
}

/// Settings for [`DiagramBuilder::export`](crate::DiagramBuilder::export).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportConfig {
    /// Output format, `text` unless configured.
    #[serde(default)]
    format: ExportFormat,

    /// Indent JSON output.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            pretty: default_pretty(),
        }
    }
}

impl ExportConfig {
    /// Creates a new [`ExportConfig`].
    ///
    /// # Arguments
    ///
    /// * `format` - Output format.
    /// * `pretty` - Whether JSON output is indented. Ignored for text.
    pub fn new(format: ExportFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }
}
