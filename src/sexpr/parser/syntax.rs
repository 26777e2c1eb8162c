//! The extensible expression grammar
//!
//! A [`Syntax`] is a shared handle to an ordered list of grammar
//! alternatives. Alternatives are registered as factories: each receives the
//! recursive handle to the whole expression grammar ([`Expr`]) and returns the
//! parser for its own form. The ordered choice over all alternatives is
//! assembled only when [`Syntax::parser`] is called, so
//!
//! - list alternatives can refer to "any expression" even though the set of
//!   expressions is not complete when they are registered, and
//! - alternatives added later (reader extensions) take part in every read
//!   that starts after the addition, including reads of nested forms.
//!
//! Cloning a `Syntax` shares the handle. Use [`Syntax::fork`] for an
//! independent copy.

use chumsky::prelude::*;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::sexpr::lexer::Token;
use crate::sexpr::parser::combinators::{float, hash, integer, list_expr, quoted, string, symbol};
use crate::sexpr::parser::{Expr, Outcome, ParserError, Production};

type Factory = Rc<dyn Fn(Expr) -> Production>;

#[derive(Clone)]
struct Rule {
    name: Rc<str>,
    build: Factory,
}

#[derive(Clone)]
pub struct Syntax {
    rules: Rc<RefCell<Vec<Rule>>>,
}

impl Syntax {
    /// A grammar with no alternatives
    pub fn empty() -> Self {
        Syntax {
            rules: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// The standard S-expression grammar, in match priority order
    pub fn standard() -> Self {
        let syntax = Syntax::empty();
        syntax.add("integer", |_| integer());
        syntax.add("float", |_| float());
        syntax.add("string", |_| string());
        syntax.add("list", |expr| list_expr(Token::ListOpen, expr, Token::ListClose));
        syntax.add("bracket-list", |expr| {
            list_expr(Token::ListOpen2, expr, Token::ListClose2)
        });
        syntax.add("quote", quoted);
        syntax.add("symbol", |_| symbol());
        syntax.add("hash", |_| hash());
        syntax
    }

    /// Append an alternative. It is tried after every alternative already
    /// registered.
    pub fn add<F, P>(&self, name: &str, rule: F)
    where
        F: Fn(Expr) -> P + 'static,
        P: Parser<Token, Outcome, Error = ParserError> + 'static,
    {
        let build: Factory = Rc::new(move |expr| rule(expr).boxed());
        self.rules.borrow_mut().push(Rule {
            name: Rc::from(name),
            build,
        });
    }

    /// Names of the registered alternatives, in priority order
    pub fn names(&self) -> Vec<String> {
        self.rules
            .borrow()
            .iter()
            .map(|rule| rule.name.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.borrow().is_empty()
    }

    /// An independent grammar starting with the same alternatives
    pub fn fork(&self) -> Syntax {
        Syntax {
            rules: Rc::new(RefCell::new(self.rules.borrow().clone())),
        }
    }

    /// Whether two handles refer to the same grammar
    pub fn ptr_eq(&self, other: &Syntax) -> bool {
        Rc::ptr_eq(&self.rules, &other.rules)
    }

    /// Assemble the expression parser from the alternatives registered now
    pub fn parser(&self) -> Expr {
        let rules = self.rules.borrow().clone();
        recursive(move |expr: Expr| {
            ordered_choice(rules.iter().map(|rule| (rule.build)(expr.clone())).collect())
        })
    }
}

impl Default for Syntax {
    /// The standard grammar
    fn default() -> Self {
        Syntax::standard()
    }
}

impl fmt::Debug for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Syntax").field("rules", &self.names()).finish()
    }
}

/// First alternative that matches wins
fn ordered_choice(alternatives: Vec<Production>) -> Production {
    alternatives
        .into_iter()
        .reduce(|first, next| first.or(next).boxed())
        .unwrap_or_else(no_alternatives)
}

fn no_alternatives() -> Production {
    any()
        .try_map(|_, span| {
            Err(ParserError::custom(
                span,
                "grammar has no alternatives registered",
            ))
        })
        .boxed()
}
