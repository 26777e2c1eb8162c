//! Textual rendering of values
//!
//! Two styles exist. [`Style::Write`] produces text the reader turns back
//! into an equal value: strings are quoted and escaped, floats always carry a
//! fractional part. [`Style::Display`] is meant for people: strings appear
//! raw. Both render void as `#v` and booleans as `#t` / `#f`.
//!
//! Symbols are written by name in both styles, with no quoting. A symbol the
//! reader produced always reads back as itself, but one built with
//! [`Value::symbol`] from a name the lexer splits or classifies differently
//! (`"a b"`, `"12"`, `""`) does not. [`Symbol::is_plain`] tells the two
//! apart.
//!
//! [`Symbol::is_plain`]: crate::sexpr::value::Symbol::is_plain

use crate::sexpr::error::Error;
use crate::sexpr::value::Value;
use std::fmt;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Write,
    Display,
}

/// A value paired with a rendering style, printable with `{}`
pub struct Printer<'v> {
    value: &'v Value,
    style: Style,
}

impl<'v> Printer<'v> {
    pub fn new(value: &'v Value, style: Style) -> Self {
        Printer { value, style }
    }
}

impl fmt::Display for Printer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self.value, self.style, f)
    }
}

/// Render `value` to a byte sink
pub fn write_value<W: io::Write + ?Sized>(
    value: &Value,
    sink: &mut W,
    style: Style,
) -> Result<(), Error> {
    write!(sink, "{}", Printer::new(value, style))?;
    Ok(())
}

/// Pending work while rendering; lists are unfolded onto an explicit stack
enum Step {
    Value(Value),
    /// The rest of a list whose first item is already out
    Rest(Value),
    Close,
}

fn render(value: &Value, style: Style, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut steps = vec![Step::Value(value.clone())];
    while let Some(step) = steps.pop() {
        match step {
            Step::Value(Value::Pair(pair)) => {
                f.write_str("(")?;
                steps.push(Step::Rest(pair.cdr()));
                steps.push(Step::Value(pair.car()));
            }
            Step::Value(atom) => render_atom(&atom, style, f)?,
            Step::Rest(Value::Pair(pair)) => {
                f.write_str(" ")?;
                steps.push(Step::Rest(pair.cdr()));
                steps.push(Step::Value(pair.car()));
            }
            Step::Rest(Value::Nil) | Step::Close => f.write_str(")")?,
            Step::Rest(tail) => {
                f.write_str(" . ")?;
                steps.push(Step::Close);
                steps.push(Step::Value(tail));
            }
        }
    }
    Ok(())
}

fn render_atom(value: &Value, style: Style, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Void => f.write_str("#v"),
        Value::Boolean(true) => f.write_str("#t"),
        Value::Boolean(false) => f.write_str("#f"),
        Value::Integer(n) => write!(f, "{}", n),
        Value::Float(x) => render_float(*x, f),
        Value::String(s) => match style {
            Style::Write => write!(f, "{:?}", s),
            Style::Display => f.write_str(s),
        },
        Value::Symbol(symbol) => f.write_str(symbol.name()),
        Value::Nil => f.write_str("()"),
        Value::Eof => f.write_str("#<eof>"),
        Value::Port(port) => write!(f, "#<{}>", port.kind_name()),
        Value::Pair(_) => Err(fmt::Error),
    }
}

// f64's Display never uses an exponent, so only the fraction may be missing.
fn render_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        f.write_str("+nan.0")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "+inf.0" } else { "-inf.0" })
    } else {
        let text = x.to_string();
        if text.contains('.') {
            f.write_str(&text)
        } else {
            write!(f, "{}.0", text)
        }
    }
}
