//! Semantic diagram model types.
//!
//! This module contains the model produced by parsing a use-case diagram.
//! Consumers such as renderers, analyzers and exporters work on these types.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ lexer
//! Tokens
//!     ↓ parser
//! Parser AST (parser_types) - syntactic structure with spans
//!     ↓ builder
//! Semantic Model (these types)
//!     ↓ export
//! Text / JSON
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - The [`Diagram`] container
//! - [`element`] - Diagram entries: [`Actor`], [`UseCase`], [`Relation`], [`Package`]

pub mod diagram;
pub mod element;

pub use diagram::*;
pub use element::*;
