//! Errors that stop a unit from being translated at all.
//!
//! Anything finer-grained than these degrades to an inline marker in the
//! output instead of an error.

/// Error raised while reading source text into the AST.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid syntax at line {line}, column {column}")]
    Syntax { line: usize, column: usize },

    #[error("expected {expected}, got {got}")]
    UnexpectedNode { expected: String, got: String },

    #[error("no class definition found")]
    NoUnit,

    #[error("expected exactly one class definition, found {}: {}", .names.len(), .names.join(", "))]
    MultipleUnits { names: Vec<String> },
}

