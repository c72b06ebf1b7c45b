//! umlcase CLI library
//!
//! This module contains the core CLI logic for the umlcase diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use umlcase::{DiagramBuilder, UseCaseError};

/// Run the umlcase CLI application
///
/// This function loads the configuration, parses the input file and
/// exports the resulting model. When `--output` is set the export is
/// written to that file; it is always returned so the caller can print it.
///
/// # Errors
///
/// Returns `UseCaseError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<String, UseCaseError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing diagram"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(format) = args.format {
        app_config = app_config.with_format(format);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.parse(&source)?;
    let output = builder.export(&diagram)?;

    if let Some(path) = &args.output {
        fs::write(path, &output)?;
        info!(output_file = path; "Diagram exported successfully");
    }

    Ok(output)
}
