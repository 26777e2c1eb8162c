//! Grammar tests: standard alternatives read through the reader

use crate::sexpr::testing::{assert_read_error, int, list, read_all, read_one, sym};
use crate::sexpr::reader::{Reader, ReaderConfig};
use crate::sexpr::value::Value;

#[test]
fn test_atoms() {
    assert_eq!(read_one("42").unwrap(), int(42));
    assert_eq!(read_one("-17").unwrap(), int(-17));
    assert_eq!(read_one("2.5").unwrap(), Value::Float(2.5));
    assert_eq!(read_one(r#""a\tb""#).unwrap(), Value::string("a\tb"));
    assert_eq!(read_one("hello").unwrap(), sym("hello"));
    assert_eq!(read_one("-").unwrap(), sym("-"));
}

#[test]
fn test_hash_literals() {
    assert_eq!(read_one("#v").unwrap(), Value::Void);
    assert_eq!(read_one("#t").unwrap(), Value::Boolean(true));
    assert_eq!(read_one("#f").unwrap(), Value::Boolean(false));
    assert_read_error("#z", "syntax-error", "unknown hash syntax: #z");
}

#[test]
fn test_empty_lists_are_nil() {
    assert!(read_one("()").unwrap().is_identical(&Value::Nil));
    assert!(read_one("[]").unwrap().is_identical(&Value::Nil));
    assert!(read_one("( ; nothing\n )").unwrap().is_nil());
}

#[test]
fn test_bracket_styles_are_equivalent() {
    let expected = list([sym("a"), sym("b"), sym("c")]);
    assert_eq!(read_one("(a b c)").unwrap(), expected);
    assert_eq!(read_one("[a b c]").unwrap(), expected);
    assert_eq!(read_one("(a [b] (c))").unwrap(), list([sym("a"), list([sym("b")]), list([sym("c")])]));
}

#[test]
fn test_mismatched_brackets_fail() {
    assert_read_error("(a b]", "syntax-error", "failed to parse");
    assert_read_error("[a b)", "syntax-error", "failed to parse");
}

#[test]
fn test_dotted_tails() {
    assert_eq!(read_one("(a . b)").unwrap(), Value::cons(sym("a"), sym("b")));
    assert_eq!(
        read_one("(a b . c)").unwrap(),
        Value::cons(sym("a"), Value::cons(sym("b"), sym("c")))
    );
    assert_eq!(read_one("(. x)").unwrap(), sym("x"));
    assert_eq!(read_one("(a . (b))").unwrap(), list([sym("a"), sym("b")]));
}

#[test]
fn test_malformed_dotted_lists_fail() {
    assert_read_error("(a . b c)", "syntax-error", "failed to parse");
    assert_read_error("(a .)", "syntax-error", "failed to parse");
    assert_read_error(".", "syntax-error", "failed to parse");
}

#[test]
fn test_quote_shorthands() {
    for (source, head) in [
        ("'x", "quote"),
        ("`x", "quasiquote"),
        (",x", "unquote"),
        (",@x", "unquote-splicing"),
    ] {
        assert_eq!(read_one(source).unwrap(), list([sym(head), sym("x")]), "{}", source);
    }
    assert_eq!(
        read_one("'(1 . 2)").unwrap(),
        list([sym("quote"), Value::cons(int(1), int(2))])
    );
    assert_eq!(
        read_one("''a").unwrap(),
        list([sym("quote"), list([sym("quote"), sym("a")])])
    );
}

#[test]
fn test_failure_poisons_enclosing_lists() {
    assert_read_error("(1 2 #z)", "syntax-error", "unknown hash syntax: #z");
    assert_read_error("(1 (2 (#q)))", "syntax-error", "unknown hash syntax: #q");
    assert_read_error("(1 . #z)", "syntax-error", "unknown hash syntax: #z");
    assert_read_error("'#z", "syntax-error", "unknown hash syntax: #z");
}

#[test]
fn test_rightmost_failure_is_reported() {
    assert_read_error("(#a #b)", "syntax-error", "unknown hash syntax: #b");
}

#[test]
fn test_conversion_failures_are_system_errors() {
    let err = read_one("(x 123456789012345678901234567890)").unwrap_err();
    assert_eq!(err.kind(), "system-error");
    assert!(err.message().starts_with("invalid integer literal"));
    assert_eq!(read_one(r#""\q""#).unwrap_err().kind(), "system-error");
}

#[test]
fn test_backslash_before_newline_is_one_bad_string() {
    let config = ReaderConfig::default();
    let mut reader = Reader::new("\"a\\\nb\" c\n".as_bytes());
    let err = reader.read(&config).unwrap_err();
    assert_eq!(err.kind(), "system-error");
    assert!(err.message().starts_with("invalid string literal"));
    assert_eq!(reader.read(&config).unwrap(), sym("c"));
}

#[test]
fn test_symbols_are_interned() {
    let values = read_all("foo (foo)").unwrap();
    let inner = values[1].car().unwrap();
    assert!(values[0].is_identical(&inner));
}

#[test]
fn test_no_datum_means_eof() {
    assert!(read_one("").unwrap().is_eof());
    assert!(read_one(" \n\t ; just a comment").unwrap().is_eof());
}

#[test]
fn test_comments_between_tokens() {
    let source = "(define ; name\n  x   ; value\n  [1 . 2])";
    assert_eq!(
        read_one(source).unwrap(),
        list([sym("define"), sym("x"), Value::cons(int(1), int(2))])
    );
}
