//! Parser combinator functions for the standard grammar alternatives.

use chumsky::prelude::*;

use crate::sexpr::lexer::{QuoteKind, Token};
use crate::sexpr::parser::conversion;
use crate::sexpr::parser::{Expr, Outcome, ParserError};
use crate::sexpr::value::Value;

/// Helper: match a specific token, discarding it
pub(crate) fn token(t: Token) -> impl Parser<Token, (), Error = ParserError> + Clone {
    just(t).ignored()
}

pub fn integer() -> impl Parser<Token, Outcome, Error = ParserError> {
    chumsky::select! { Token::Int(lexeme) => lexeme }.map(|lexeme: String| conversion::integer(&lexeme))
}

pub fn float() -> impl Parser<Token, Outcome, Error = ParserError> {
    chumsky::select! { Token::Float(lexeme) => lexeme }.map(|lexeme: String| conversion::float(&lexeme))
}

pub fn string() -> impl Parser<Token, Outcome, Error = ParserError> {
    chumsky::select! { Token::Str(lexeme) => lexeme }.map(|lexeme: String| conversion::string(&lexeme))
}

pub fn symbol() -> impl Parser<Token, Outcome, Error = ParserError> {
    chumsky::select! { Token::Symbol(name) => name }.map(|name: String| Ok(Value::symbol(&name)))
}

pub fn hash() -> impl Parser<Token, Outcome, Error = ParserError> {
    chumsky::select! { Token::Hash(lexeme) => lexeme }.map(|lexeme: String| conversion::hash_literal(&lexeme))
}

/// Quote shorthand: a marker followed by one expression, expanded to a
/// two-element list headed by `quote`, `quasiquote`, `unquote` or
/// `unquote-splicing`
pub fn quoted(expr: Expr) -> impl Parser<Token, Outcome, Error = ParserError> {
    chumsky::select! { Token::Quote(kind) => kind }
        .then(expr)
        .map(|(kind, outcome): (QuoteKind, Outcome)| {
            outcome.map(|datum| Value::list([Value::symbol(kind.symbol_name()), datum]))
        })
}

/// A bracketed list: `open`, any number of expressions, an optional
/// `. expr` tail, then `close`
pub fn list_expr(
    open: Token,
    expr: Expr,
    close: Token,
) -> impl Parser<Token, Outcome, Error = ParserError> {
    let tail = token(Token::Dot).ignore_then(expr.clone()).or_not();

    token(open)
        .ignore_then(expr.repeated().then(tail))
        .then_ignore(token(close))
        .map(|(items, tail)| build_list(items, tail))
}

/// Fold list elements into a pair chain, last to first.
///
/// The tail (or the empty list when there is none) seeds the fold. The first
/// failure met, checking the tail and then the items from last to first,
/// becomes the result of the whole list.
pub fn build_list(items: Vec<Outcome>, tail: Option<Outcome>) -> Outcome {
    let mut list = tail.unwrap_or(Ok(Value::Nil))?;
    for item in items.into_iter().rev() {
        list = Value::cons(item?, list);
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sexpr::error::Error;

    fn int(n: i64) -> Outcome {
        Ok(Value::Integer(n))
    }

    #[test]
    fn test_empty_list_without_tail() {
        assert!(build_list(vec![], None).unwrap().is_nil());
    }

    #[test]
    fn test_tail_only_yields_tail() {
        assert_eq!(build_list(vec![], Some(int(7))).unwrap(), Value::Integer(7));
    }

    #[test]
    fn test_items_fold_right_to_left() {
        let list = build_list(vec![int(1), int(2)], None).unwrap();
        assert_eq!(list, Value::list([Value::Integer(1), Value::Integer(2)]));
    }

    #[test]
    fn test_dotted_tail() {
        let list = build_list(vec![int(1)], Some(int(2))).unwrap();
        assert_eq!(list, Value::cons(Value::Integer(1), Value::Integer(2)));
    }

    #[test]
    fn test_failure_in_item_poisons_list() {
        let bad = Err(Error::Syntax("unknown hash syntax: #z".into()));
        let err = build_list(vec![int(1), bad, int(3)], None).unwrap_err();
        assert_eq!(err.message(), "unknown hash syntax: #z");
    }

    #[test]
    fn test_failure_in_tail_poisons_list() {
        let bad = Err(Error::System("bad".into()));
        let err = build_list(vec![int(1)], Some(bad)).unwrap_err();
        assert_eq!(err.kind(), "system-error");
    }

    #[test]
    fn test_rightmost_failure_wins() {
        let first = Err(Error::System("first".into()));
        let last = Err(Error::System("last".into()));
        let err = build_list(vec![first, int(2), last], None).unwrap_err();
        assert_eq!(err.message(), "last");
    }
}
