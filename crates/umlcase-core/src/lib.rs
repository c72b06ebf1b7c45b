//! umlcase Core Types and Definitions
//!
//! This crate provides the foundational types for umlcase use-case diagrams.
//! It includes:
//!
//! - **Identifiers**: Validated diagram identifiers ([`identifier::Identifier`])
//! - **Semantic**: The diagram model produced by the parser ([`semantic`] module)

pub mod identifier;
pub mod semantic;
