//! Values produced by the reader
//!
//! Atoms are plain data. Pairs are shared, mutable cells: cloning a
//! [`Value::Pair`] clones the handle, not the cell, so mutations through one
//! handle are visible through every other. The empty list ([`Value::Nil`])
//! and the end-of-file object ([`Value::Eof`]) are unit variants, so there is
//! exactly one of each.
//!
//! `PartialEq` compares structure (two separately built `(a b)` lists are
//! equal). [`Value::is_identical`] compares identity.

pub mod symbol;

use crate::sexpr::port::Port;
use crate::sexpr::writer::{Printer, Style};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use symbol::Symbol;

#[derive(Clone)]
pub enum Value {
    /// The unspecified value, written `#v`
    Void,
    /// The empty list
    Nil,
    /// The end-of-file object
    Eof,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Symbol(Symbol),
    Pair(Rc<Pair>),
    Port(Port),
}

/// A cons cell with two independently mutable fields
pub struct Pair {
    car: RefCell<Value>,
    cdr: RefCell<Value>,
}

impl Pair {
    pub fn new(car: Value, cdr: Value) -> Self {
        Pair {
            car: RefCell::new(car),
            cdr: RefCell::new(cdr),
        }
    }

    pub fn car(&self) -> Value {
        self.car.borrow().clone()
    }

    pub fn cdr(&self) -> Value {
        self.cdr.borrow().clone()
    }

    pub fn set_car(&self, value: Value) {
        *self.car.borrow_mut() = value;
    }

    pub fn set_cdr(&self, value: Value) {
        *self.cdr.borrow_mut() = value;
    }
}

// Unlinks uniquely owned pairs through an explicit work list, so dropping
// deeply nested or long structures never recurses.
impl Drop for Pair {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach(self, &mut pending);
        while let Some(pair) = pending.pop() {
            if let Ok(mut cell) = Rc::try_unwrap(pair) {
                detach(&mut cell, &mut pending);
            }
        }
    }
}

fn detach(pair: &mut Pair, pending: &mut Vec<Rc<Pair>>) {
    for field in [&mut pair.car, &mut pair.cdr] {
        if field.get_mut().is_pair() {
            if let Value::Pair(inner) = std::mem::replace(field.get_mut(), Value::Nil) {
                pending.push(inner);
            }
        }
    }
}

impl Value {
    /// Allocate a fresh pair
    pub fn cons(car: Value, cdr: Value) -> Value {
        Value::Pair(Rc::new(Pair::new(car, cdr)))
    }

    /// Build a proper list, right to left
    pub fn list<I>(items: I) -> Value
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rfold(Value::Nil, |tail, item| Value::cons(item, tail))
    }

    pub fn symbol(name: &str) -> Value {
        Value::Symbol(Symbol::intern(name))
    }

    pub fn string(text: impl Into<String>) -> Value {
        Value::String(text.into())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Value::Eof)
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }

    pub fn as_pair(&self) -> Option<&Rc<Pair>> {
        match self {
            Value::Pair(pair) => Some(pair),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Head of a pair
    pub fn car(&self) -> Option<Value> {
        self.as_pair().map(|pair| pair.car())
    }

    /// Tail of a pair
    pub fn cdr(&self) -> Option<Value> {
        self.as_pair().map(|pair| pair.cdr())
    }

    /// Iterate over the elements of a list. Stops at the first non-pair tail.
    pub fn iter(&self) -> Iter {
        Iter { next: self.clone() }
    }

    /// Identity comparison: same pair cell, same port, same interned symbol,
    /// or the same sentinel. Atoms compare by value.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Pair(a), Value::Pair(b)) => Rc::ptr_eq(a, b),
            (Value::Port(a), Value::Port(b)) => a.ptr_eq(b),
            (Value::Pair(_), _) | (_, Value::Pair(_)) => false,
            _ => atoms_equal(self, other),
        }
    }

    /// Name of the value's type, as used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Void => "void",
            Value::Nil => "empty-list",
            Value::Eof => "eof-object",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Pair(_) => "pair",
            Value::Port(port) => port.kind_name(),
        }
    }

    /// Re-readable rendering, the form `write` produces
    pub fn written(&self) -> Printer<'_> {
        Printer::new(self, Style::Write)
    }

    /// Human-readable rendering, the form `display` produces
    pub fn displayed(&self) -> Printer<'_> {
        Printer::new(self, Style::Display)
    }
}

fn atoms_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Void, Value::Void) | (Value::Nil, Value::Nil) | (Value::Eof, Value::Eof) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Port(x), Value::Port(y)) => x.ptr_eq(y),
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        let mut pending = vec![(self.clone(), other.clone())];
        while let Some((a, b)) = pending.pop() {
            match (&a, &b) {
                (Value::Pair(x), Value::Pair(y)) => {
                    if !Rc::ptr_eq(x, y) {
                        pending.push((x.cdr(), y.cdr()));
                        pending.push((x.car(), y.car()));
                    }
                }
                _ if !atoms_equal(&a, &b) => return false,
                _ => {}
            }
        }
        true
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.written(), f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.displayed(), f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

/// Iterator over list elements, see [`Value::iter`]
pub struct Iter {
    next: Value,
}

impl Iterator for Iter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match std::mem::replace(&mut self.next, Value::Nil) {
            Value::Pair(pair) => {
                self.next = pair.cdr();
                Some(pair.car())
            }
            _ => None,
        }
    }
}
