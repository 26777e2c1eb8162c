//! Lexer module for S-expressions
//!
//! This module contains the tokenization logic: token definitions and the
//! scanner that walks a source text lazily.
//!
//! Pattern priority
//!
//! Tokens are matched by longest prefix. When two patterns match a prefix of
//! the same length, the higher priority kind wins: structural punctuation,
//! numbers, strings, comments, whitespace and quote markers all beat the
//! catch-all symbol pattern. Because matching is longest-first, `3.5` is a
//! single float token and never an integer followed by a dot.
//!
//! Comments and whitespace are real tokens here. The grammar never sees them:
//! [`Scanner::significant`] filters them out before tokens reach the parser.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, tokenize_raw, Scanner, Span};
pub use tokens::{QuoteKind, Token};
