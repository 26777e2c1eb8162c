//! Interned symbols
//!
//! Every symbol name is stored once in a process-wide table. Two symbols with
//! the same name share the same allocation, so symbol equality is a pointer
//! comparison.

use crate::sexpr::lexer::{tokenize, Token};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, PoisonError};

static SYMBOLS: Lazy<Mutex<HashSet<Arc<str>>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// An interned symbol name
#[derive(Clone)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Return the canonical symbol for `name`, creating it on first use
    pub fn intern(name: &str) -> Self {
        let mut table = SYMBOLS.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = table.get(name) {
            return Symbol(Arc::clone(existing));
        }
        let name: Arc<str> = Arc::from(name);
        table.insert(Arc::clone(&name));
        Symbol(name)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether the bare name lexes back as this same symbol
    ///
    /// Names produced by the reader always are. Names with spaces, brackets
    /// or quotes, and names that look like numbers, are not.
    pub fn is_plain(&self) -> bool {
        match tokenize(self.name()) {
            Ok(tokens) => matches!(tokens.as_slice(), [(Token::Symbol(lexeme), _)] if lexeme == self.name()),
            Err(_) => false,
        }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.name())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
