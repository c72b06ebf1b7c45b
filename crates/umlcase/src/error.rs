//! Error types for umlcase operations.
//!
//! This module provides the main error type [`UseCaseError`] which wraps
//! the failures that can occur while loading, parsing and exporting.

use std::io;

use thiserror::Error;

use umlcase_parser::ParseError;

/// The main error type for umlcase operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the [`ParseError`]
/// so callers can render the diagnostic's labelled spans.
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}

impl UseCaseError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
