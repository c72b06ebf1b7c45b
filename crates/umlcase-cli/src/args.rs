//! Command-line argument definitions for the umlcase CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input and output paths, the export
//! format, configuration file selection, and logging verbosity.

use clap::Parser;

use umlcase::config::ExportFormat;

/// Command-line arguments for the umlcase diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram file
    #[arg(help = "Path to the input .puml file")]
    pub input: String,

    /// Write the export to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<String>,

    /// Export format (text, json); overrides the configuration file
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["umlcase", "diagram.puml"]).unwrap();

        assert_eq!(args.input, "diagram.puml");
        assert_eq!(args.output, None);
        assert_eq!(args.format, None);
        assert_eq!(args.config, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_format_flag() {
        let args =
            Args::try_parse_from(["umlcase", "diagram.puml", "--format", "json", "-o", "out.json"])
                .unwrap();

        assert_eq!(args.format, Some(ExportFormat::Json));
        assert_eq!(args.output.as_deref(), Some("out.json"));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["umlcase", "diagram.puml", "-f", "svg"]).is_err());
    }
}
