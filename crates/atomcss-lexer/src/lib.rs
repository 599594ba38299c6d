//! atomcss Lexer
//!
//! Scans raw CSS property values (`1px solid rgba(0, 0, 0, .5)`) into a
//! tree of value nodes: words, quoted strings, whitespace runs, dividers
//! and (possibly nested) functions. Printing the tree gives back the exact
//! input, so normalization passes can rewrite individual nodes and
//! stringify the result.
//!
//! # Example
//!
//! ```
//! use atomcss_lexer::Scanner;
//!
//! let tree = Scanner::scan("1px solid red").unwrap();
//! assert_eq!(tree.nodes.len(), 5);
//! assert_eq!(tree.to_string(), "1px solid red");
//! ```

pub mod node;
pub mod scanner;

pub use node::{parse_unit, Dimension, NodeKind, Span, ValueNode, ValueTree};
pub use scanner::Scanner;

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Lexer error at line {line}, column {column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
