//! Conversion of token lexemes into values
//!
//! The lexer guarantees the shape of each lexeme, but conversion can still
//! fail (integer overflow, an unknown escape sequence). Those failures are
//! system errors; an unknown `#` form is a syntax error.

use crate::sexpr::error::Error;
use crate::sexpr::parser::Outcome;
use crate::sexpr::value::Value;
use std::str::Chars;

pub fn integer(lexeme: &str) -> Outcome {
    lexeme
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|e| Error::System(format!("invalid integer literal {}: {}", lexeme, e)))
}

pub fn float(lexeme: &str) -> Outcome {
    lexeme
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|e| Error::System(format!("invalid float literal {}: {}", lexeme, e)))
}

pub fn string(lexeme: &str) -> Outcome {
    unescape(lexeme).map(Value::String)
}

/// `#v`, `#t` and `#f`; anything else after `#` is a syntax error
pub fn hash_literal(lexeme: &str) -> Outcome {
    match lexeme.chars().nth(1) {
        Some('v') => Ok(Value::Void),
        Some('f') => Ok(Value::Boolean(false)),
        Some('t') => Ok(Value::Boolean(true)),
        _ => Err(Error::Syntax(format!("unknown hash syntax: {}", lexeme))),
    }
}

/// Strip the surrounding quotes of a string literal and resolve its escapes.
///
/// Supported escapes: `\a \b \f \n \r \t \v \\ \" \' \0`, `\xHH` (ASCII),
/// `\uHHHH` and `\u{H..}`.
pub fn unescape(quoted: &str) -> Result<String, Error> {
    let invalid = || Error::System(format!("invalid string literal {}", quoted));
    let inner = quoted
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next().ok_or_else(invalid)? {
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0b',
            '0' => '\0',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            'x' => hex_digits(&mut chars, 2)
                .filter(|code| *code < 0x80)
                .and_then(char::from_u32)
                .ok_or_else(invalid)?,
            'u' => unicode_escape(&mut chars).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };
        out.push(escaped);
    }
    Ok(out)
}

fn hex_digits(chars: &mut Chars<'_>, count: usize) -> Option<u32> {
    let digits: String = chars.by_ref().take(count).collect();
    if digits.len() != count || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok()
}

fn unicode_escape(chars: &mut Chars<'_>) -> Option<char> {
    let rest = chars.as_str();
    if let Some(braced) = rest.strip_prefix('{') {
        let end = braced.find('}')?;
        let digits = &braced[..end];
        if digits.is_empty() || digits.len() > 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let code = u32::from_str_radix(digits, 16).ok()?;
        *chars = braced[end + 1..].chars();
        char::from_u32(code)
    } else {
        hex_digits(chars, 4).and_then(char::from_u32)
    }
}
