//! Parser module for S-expressions
//!
//! The grammar is a [`Syntax`]: an ordered, extensible set of alternatives
//! tried first to last. Each alternative is a chumsky parser over [`Token`]s
//! producing an [`Outcome`]. A literal that matches lexically but fails to
//! convert (an out-of-range integer, a bad string escape, an unknown `#`
//! form) is a successful match whose outcome is an `Err`. Such outcomes are
//! carried through list construction and become the result of the whole read.
//!
//! ## Testing
//!
//! Grammar tests live in `tests.rs` next to this module and use the helpers
//! from the [testing module](crate::sexpr::testing).

pub mod combinators;
pub mod conversion;
pub mod syntax;
#[cfg(test)]
mod tests;

use chumsky::prelude::*;

use crate::sexpr::error::Error;
use crate::sexpr::lexer::Token;
use crate::sexpr::value::Value;

pub use combinators::{build_list, list_expr};
pub use syntax::Syntax;

/// Result of a single production: a value, or a failure carried as data
pub type Outcome = Result<Value, Error>;

/// Type alias for parser error
pub type ParserError = Simple<Token>;

/// Handle to the whole expression grammar, given to every production
pub type Expr = Recursive<'static, Token, Outcome, ParserError>;

/// A type-erased grammar alternative
pub type Production = BoxedParser<'static, Token, Outcome, ParserError>;
