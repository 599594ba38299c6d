//! atomcss Parser
//!
//! Reads an input document (JSON) into the raw style tree and validates
//! style namespaces before compilation. The tree is the already-evaluated
//! form of style objects: primitives, fallback arrays, conditional maps and
//! foreign-include markers.

pub mod ast;
pub mod parser;
pub mod validator;

pub use ast::{is_pseudo_element, Document, IncludedStyles, KeyKind, RawMap, RawValue, ThemeOverride};
pub use parser::Parser;
pub use validator::{validate_namespace, ValidationError};

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
