//! The [`ParseError`] type returned by every parsing entry point.

use thiserror::Error;

use crate::error::Diagnostic;

/// What the parser found where it could not continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    /// The source text of the offending token.
    Token(String),
    /// The token stream ended.
    EndOfInput,
}

/// The category of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A character matched no token rule.
    Lexical { character: char },
    /// The token stream does not fit the grammar at this point.
    Syntax { found: Found },
}

/// Error type for the parsing pipeline.
///
/// Callers branch on [`ParseError::kind`]; [`ParseError::diagnostic`]
/// carries the code, labels and help text for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {diagnostic}")]
pub struct ParseError {
    kind: ErrorKind,
    line: usize,
    diagnostic: Diagnostic,
}

impl ParseError {
    /// Create a lexical error for `character` on `line`.
    pub fn lexical(character: char, line: usize, diagnostic: Diagnostic) -> Self {
        Self {
            kind: ErrorKind::Lexical { character },
            line,
            diagnostic,
        }
    }

    /// Create a syntax error for `found` on `line`.
    pub fn syntax(found: Found, line: usize, diagnostic: Diagnostic) -> Self {
        Self {
            kind: ErrorKind::Syntax { found },
            line,
            diagnostic,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 1-based line of the offending character or token.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Returns `true` if the failure was raised by the lexer.
    pub fn is_lexical(&self) -> bool {
        matches!(self.kind, ErrorKind::Lexical { .. })
    }

    /// Returns `true` if the failure was raised by the parser.
    pub fn is_syntax(&self) -> bool {
        matches!(self.kind, ErrorKind::Syntax { .. })
    }
}
