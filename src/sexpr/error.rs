//! Error types for reading and writing S-expressions
//!
//! Three kinds of failure exist:
//!
//! - **Type errors**: a port argument lacks the read or write capability
//! - **Syntax errors**: no grammar alternative matches, unmatched input, or an
//!   unknown `#` form
//! - **System errors**: a literal conversion or the underlying I/O fails
//!
//! Failures produced inside the grammar are ordinary values
//! ([`Outcome`](crate::sexpr::parser::Outcome)) and travel through list
//! construction like any other element.

use crate::sexpr::value::Value;
use std::io;
use thiserror::Error;

/// Message used when no grammar alternative matches the input
pub const FAILED_TO_PARSE: &str = "failed to parse";

#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A value was given where a port with some capability was required
    #[error("type error: expected {expected}, found {found:?}")]
    Type { expected: &'static str, found: Value },

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("system error: {0}")]
    System(String),
}

impl Error {
    pub fn type_error(expected: &'static str, found: &Value) -> Self {
        Error::Type {
            expected,
            found: found.clone(),
        }
    }

    /// Symbolic name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Type { .. } => "type-error",
            Error::Syntax(_) => "syntax-error",
            Error::System(_) => "system-error",
        }
    }

    /// Human-readable message without the kind prefix
    pub fn message(&self) -> String {
        match self {
            Error::Type { expected, found } => format!("expected {}, found {:?}", expected, found),
            Error::Syntax(msg) | Error::System(msg) => msg.clone(),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::System(err.to_string())
    }
}
