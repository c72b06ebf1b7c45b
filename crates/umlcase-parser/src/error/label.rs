//! Source spans annotated with a short message.

use crate::span::Span;

/// What a [`Label`] marks in the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    /// The offending token or the end of input. One per diagnostic.
    Primary,
    /// Related context, such as the `{` of a package that was never closed.
    Secondary,
}

/// A message attached to a span of the diagram source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    role: LabelRole,
    span: Span,
    message: String,
}

impl Label {
    pub fn new(role: LabelRole, span: Span, message: impl Into<String>) -> Self {
        Self {
            role,
            span,
            message: message.into(),
        }
    }

    pub fn role(&self) -> LabelRole {
        self.role
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
