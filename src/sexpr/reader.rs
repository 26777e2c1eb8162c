//! Reading one datum at a time from a character source
//!
//! A [`Reader`] moves whatever its source has already buffered into a text
//! buffer and tries to match a single datum at the start of it. It only asks
//! the source for more when the buffered text ends inside an unfinished
//! datum: an open list, a quote marker with nothing after it, or an
//! unterminated string. A read on an interactive source therefore returns as
//! soon as one complete datum has been typed. Text after the datum stays
//! buffered for the next read.
//!
//! Results of one read:
//!
//! - a value, when a datum matched (even if its outcome is a failure, such
//!   as `#z` or `(1 #z)`: the matched text is consumed and the failure is
//!   returned);
//! - [`Value::Eof`], when only whitespace and comments remain and the source
//!   is exhausted. Every later read returns `Eof` again;
//! - a syntax error with the message `failed to parse`, when no alternative
//!   matches or the source ends inside a datum. Buffered text is discarded
//!   up to the end of the line where matching failed.

use chumsky::prelude::*;
use chumsky::Stream;
use std::cell::Cell;
use std::io::{self, BufRead};

use crate::sexpr::error::{Error, FAILED_TO_PARSE};
use crate::sexpr::lexer::{Scanner, Span, Token};
use crate::sexpr::parser::{Expr, Outcome, ParserError, Syntax};
use crate::sexpr::value::Value;

/// Reader configuration: the grammar used to match data
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    syntax: Syntax,
}

impl ReaderConfig {
    pub fn new(syntax: Syntax) -> Self {
        ReaderConfig { syntax }
    }

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }
}

pub struct Reader<R> {
    source: R,
    buffer: String,
    /// Bytes of a character split across two source chunks
    partial: Vec<u8>,
    exhausted: bool,
    grammar: Option<Compiled>,
}

/// A built parser and the grammar state it was built from
struct Compiled {
    syntax: Syntax,
    rules: usize,
    parser: Expr,
}

enum Attempt {
    Datum { outcome: Outcome, consumed: usize },
    /// Only whitespace and comments
    Empty,
    /// The text ends inside a datum
    Incomplete,
    /// Nothing can match; `at` is where matching failed
    Invalid { at: usize },
}

impl<R: BufRead> Reader<R> {
    pub fn new(source: R) -> Self {
        Reader {
            source,
            buffer: String::new(),
            partial: Vec::new(),
            exhausted: false,
            grammar: None,
        }
    }

    /// Read exactly one datum, or `Eof` at end of input
    pub fn read(&mut self, config: &ReaderConfig) -> Result<Value, Error> {
        let grammar = self
            .grammar(config.syntax())
            .map_with_span(|outcome, span: Span| (outcome, span));

        loop {
            let visible = self.complete_lines();
            match attempt(&self.buffer[..visible], &grammar) {
                Attempt::Datum { outcome, consumed } => {
                    self.buffer.drain(..consumed);
                    return outcome;
                }
                Attempt::Empty => {
                    self.buffer.drain(..visible);
                    if self.exhausted {
                        return Ok(Value::Eof);
                    }
                }
                Attempt::Incomplete if !self.exhausted => {}
                Attempt::Incomplete => {
                    self.buffer.clear();
                    return Err(Error::Syntax(FAILED_TO_PARSE.to_string()));
                }
                Attempt::Invalid { at } => {
                    let end = match self.buffer[at..].find('\n') {
                        Some(newline) => at + newline + 1,
                        None => self.buffer.len(),
                    };
                    self.buffer.drain(..end);
                    return Err(Error::Syntax(FAILED_TO_PARSE.to_string()));
                }
            }
            self.fill()?;
        }
    }

    /// Read raw text up to the next newline.
    ///
    /// Returns the line without its newline as a string value, or `Eof` once
    /// nothing is left. A final line without a newline is still returned.
    pub fn read_line(&mut self) -> Result<Value, Error> {
        loop {
            if let Some(end) = self.buffer.find('\n') {
                let mut line: String = self.buffer.drain(..=end).collect();
                line.pop();
                return Ok(Value::String(line));
            }
            if self.exhausted {
                if self.buffer.is_empty() {
                    return Ok(Value::Eof);
                }
                return Ok(Value::String(std::mem::take(&mut self.buffer)));
            }
            self.fill()?;
        }
    }

    /// Text read from the source but not consumed yet
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted && self.buffer.is_empty()
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    /// Length of the buffered text that ends in a newline, or all of it once
    /// the source is exhausted. A token at the end of an unfinished line may
    /// still grow, so matching never looks past the last newline.
    fn complete_lines(&self) -> usize {
        if self.exhausted {
            return self.buffer.len();
        }
        self.buffer.rfind('\n').map_or(0, |newline| newline + 1)
    }

    /// The parser for `syntax`, rebuilt only after the grammar changed
    fn grammar(&mut self, syntax: &Syntax) -> Expr {
        match &self.grammar {
            Some(compiled) if compiled.syntax.ptr_eq(syntax) && compiled.rules == syntax.len() => {
                compiled.parser.clone()
            }
            _ => {
                let parser = syntax.parser();
                self.grammar = Some(Compiled {
                    syntax: syntax.clone(),
                    rules: syntax.len(),
                    parser: parser.clone(),
                });
                parser
            }
        }
    }

    /// Append the source's next chunk to the buffer.
    ///
    /// Takes everything the source already holds, blocking only when it holds
    /// nothing. A character cut off at the end of a chunk waits in `partial`
    /// for the rest of its bytes.
    fn fill(&mut self) -> Result<(), Error> {
        loop {
            match self.source.fill_buf() {
                Ok(_) => break,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
        let chunk = self.source.fill_buf()?;
        if chunk.is_empty() {
            self.exhausted = true;
            if !self.partial.is_empty() {
                self.partial.clear();
                return Err(invalid_utf8());
            }
            return Ok(());
        }
        let taken = chunk.len();
        self.partial.extend_from_slice(chunk);
        self.source.consume(taken);

        let valid = match std::str::from_utf8(&self.partial) {
            Ok(text) => text.len(),
            Err(err) if err.error_len().is_none() => err.valid_up_to(),
            Err(_) => {
                self.partial.clear();
                return Err(invalid_utf8());
            }
        };
        let text = std::str::from_utf8(&self.partial[..valid]).map_err(|_| invalid_utf8())?;
        self.buffer.push_str(text);
        self.partial.drain(..valid);
        Ok(())
    }
}

fn invalid_utf8() -> Error {
    Error::System("stream did not contain valid UTF-8".to_string())
}

/// Try to match one datum at the start of `text`
fn attempt<P>(text: &str, grammar: &P) -> Attempt
where
    P: Parser<Token, (Outcome, Span), Error = ParserError>,
{
    let fault = Cell::new(None);
    let mut tokens = Scanner::new(text)
        .significant()
        .map_while(|step| match step {
            Ok(token) => Some(token),
            Err(span) => {
                fault.set(Some(span.start));
                None
            }
        })
        .peekable();

    if tokens.peek().is_none() {
        return match fault.get() {
            Some(offset) => unfinished_or_invalid(text, offset),
            None => Attempt::Empty,
        };
    }

    let eoi = text.len()..text.len();
    match grammar.parse(Stream::from_iter(eoi, tokens)) {
        Ok((outcome, span)) => Attempt::Datum {
            outcome,
            consumed: span.end,
        },
        Err(errors) => {
            let ran_out = errors.iter().any(|e| e.found().is_none());
            match fault.get() {
                _ if !ran_out => Attempt::Invalid {
                    at: errors.iter().map(|e| e.span().start).max().unwrap_or(0),
                },
                Some(offset) => unfinished_or_invalid(text, offset),
                None => Attempt::Incomplete,
            }
        }
    }
}

// Only an open string can be completed by more input; other scan failures are final.
fn unfinished_or_invalid(text: &str, offset: usize) -> Attempt {
    match text.get(offset..) {
        Some(rest) if rest.starts_with('"') => Attempt::Incomplete,
        _ => Attempt::Invalid { at: offset },
    }
}
