//! Error and diagnostic system for the umlcase parser.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Labeled spans for rich error context
//! - A typed [`ParseError`] that tells lexical failures apart from syntax
//!   failures
//!
//! Parsing stops at the first error. There is no recovery and no
//! accumulation of multiple diagnostics.
//!
//! # Example
//!
//! ```
//! # use umlcase_parser::error::{Diagnostic, ErrorCode};
//! # use umlcase_parser::Span;
//!
//! let diag = Diagnostic::new(ErrorCode::E100, "unexpected token `{`")
//!     .with_label(Span::new(24..25), "expected identifier")
//!     .with_help("a package name must follow `package`");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::{Label, LabelRole};
pub use parse_error::{ErrorKind, Found, ParseError};
