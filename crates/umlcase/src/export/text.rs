//! Plain-text export backend.
//!
//! Lists each non-empty sequence under a heading:
//!
//! ```text
//! Actors:
//!   User as :Customer:
//! Use cases:
//!   Checkout
//! Relations:
//!   User -> Checkout : communication
//! Packages:
//!   Shop
//!     Use cases:
//!       Browse
//! ```
//!
//! A package's content is listed below its name, one indentation step
//! deeper.

use std::fmt;

use umlcase_core::semantic::Diagram;

use super::{Error, Exporter};

const INDENT: &str = "  ";

/// Render a diagram as an indented listing.
pub fn render(diagram: &Diagram) -> String {
    Listing(diagram).to_string()
}

/// Display adapter for the listing.
struct Listing<'a>(&'a Diagram);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "(empty diagram)");
        }
        write_diagram(f, self.0, 0)
    }
}

fn write_diagram(f: &mut fmt::Formatter<'_>, diagram: &Diagram, depth: usize) -> fmt::Result {
    let heading = INDENT.repeat(depth);
    let entry = INDENT.repeat(depth + 1);

    if !diagram.actors().is_empty() {
        writeln!(f, "{heading}Actors:")?;
        for actor in diagram.actors() {
            write!(f, "{entry}{}", actor.name())?;
            if let Some(label) = actor.label() {
                write!(f, " as :{label}:")?;
            }
            writeln!(f)?;
        }
    }

    if !diagram.use_cases().is_empty() {
        writeln!(f, "{heading}Use cases:")?;
        for use_case in diagram.use_cases() {
            write!(f, "{entry}{}", use_case.name())?;
            if let Some(label) = use_case.label() {
                write!(f, " as ({label})")?;
            }
            writeln!(f)?;
        }
    }

    if !diagram.relations().is_empty() {
        writeln!(f, "{heading}Relations:")?;
        for relation in diagram.relations() {
            writeln!(
                f,
                "{entry}{} -> {} : {}",
                relation.source(),
                relation.target(),
                relation.kind()
            )?;
        }
    }

    if !diagram.packages().is_empty() {
        writeln!(f, "{heading}Packages:")?;
        for package in diagram.packages() {
            writeln!(f, "{entry}{}", package.name())?;
            if package.content().is_empty() {
                writeln!(f, "{entry}{INDENT}(empty package)")?;
            } else {
                write_diagram(f, package.content(), depth + 2)?;
            }
        }
    }

    Ok(())
}

/// [`Exporter`] producing the text listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export(&self, diagram: &Diagram) -> Result<String, Error> {
        Ok(render(diagram))
    }
}
