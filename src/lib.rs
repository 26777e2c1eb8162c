//! # sexpr
//!
//! A reader and writer for Lisp-family S-expressions.
//!
//! Text is scanned into tokens by a logos lexer, matched by an extensible
//! chumsky grammar, and folded into [`Value`]s (pairs, symbols, numbers,
//! strings, booleans, void, the empty list and the end-of-file object).
//! Values are written back either in re-readable form ([`write`]) or in
//! human-readable form ([`display`]).

pub mod sexpr;

pub use sexpr::api::{display, read, read_line, read_string, write};
pub use sexpr::error::Error;
pub use sexpr::port::Port;
pub use sexpr::reader::{Reader, ReaderConfig};
pub use sexpr::value::{Symbol, Value};
