//! The diagnostic type attached to every parse failure.
//!
//! A [`Diagnostic`] carries an error code, a message, labeled source spans
//! and optional help text. It holds everything a front end needs to render
//! a report such as:
//!
//! ```text
//! error[E100]: unexpected token `{`
//!   --> usecase.puml:4:9
//!    |
//!  4 | package {
//!    |         ^ expected package name
//!    |
//!    = help: a package is written `package Name { ... }`
//! ```

use std::fmt;

use crate::{
    error::{
        error_code::ErrorCode,
        label::{Label, LabelRole},
    },
    span::Span,
};

/// A rich diagnostic message with source location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with a code and message.
    ///
    /// # Example
    ///
    /// ```
    /// # use umlcase_parser::error::{Diagnostic, ErrorCode};
    /// # use umlcase_parser::Span;
    ///
    /// let diag = Diagnostic::new(ErrorCode::E001, "unexpected character `#`")
    ///     .with_label(Span::new(16..17), "unexpected character");
    /// assert_eq!(diag.to_string(), "error[E001]: unexpected character `#`");
    /// ```
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the primary label, if any.
    pub fn primary_label(&self) -> Option<&Label> {
        self.labels
            .iter()
            .find(|label| label.role() == LabelRole::Primary)
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(LabelRole::Primary, span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(LabelRole::Secondary, span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)
    }
}

impl std::error::Error for Diagnostic {}
