//! # umlcase Parser
//!
//! Tokenizer and parser for PlantUML-style use-case diagrams. This crate
//! turns source text into the [`umlcase_core::semantic::Diagram`] model.
//!
//! ## Usage
//!
//! ```
//! # use umlcase_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "@startuml\nactor User\nusecase Login\nUser --> Login\n@enduml";
//!
//!     let diagram = parse(source)?;
//!     assert_eq!(diagram.actors().len(), 1);
//!     assert_eq!(diagram.relations().len(), 1);
//!     Ok(())
//! }
//! ```

mod builder;
pub mod error;
mod lexer;
mod parser;
#[cfg(test)]
mod parser_tests;
mod parser_types;
mod span;
mod tokens;

pub use error::{ErrorKind, Found, ParseError};
pub use lexer::tokenize;
pub use span::{Span, Spanned};
pub use tokens::{Keyword, PositionedToken, Token, TokenKind, TokenStream};

use umlcase_core::semantic::Diagram;

use builder::Builder;

/// Parse source text into a semantic diagram.
///
/// The pipeline runs three phases, each of which stops at its first
/// failure:
///
/// 1. **Tokenize** - Convert source text to tokens
/// 2. **Parse** - Build the AST from tokens
/// 3. **Build** - Fold the AST into the semantic model
///
/// Every call owns its token stream, cursor and model, so independent
/// calls may run on different threads at the same time.
///
/// # Errors
///
/// Returns a [`ParseError`] whose [`ErrorKind`] is `Lexical` when a
/// character matches no token rule, or `Syntax` when the tokens do not
/// form a diagram. The error carries the line and a [`error::Diagnostic`].
///
/// # Example
///
/// ```
/// # use umlcase_parser::{parse, ErrorKind};
/// let err = parse("@startuml\nactor #\n@enduml").unwrap_err();
///
/// assert_eq!(err.kind(), &ErrorKind::Lexical { character: '#' });
/// assert_eq!(err.line(), 2);
/// ```
pub fn parse(source: &str) -> Result<Diagram, ParseError> {
    // Step 1: Tokenize
    let tokens = lexer::tokenize(source)?;

    // Step 2: Parse
    let ast = parser::build_diagram(&tokens)?;

    // Step 3: Build
    Builder::new().build(&ast)
}
