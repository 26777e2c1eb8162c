//! Test helpers shared by the unit tests of the crate
//!
//! Tests should build expected values through these helpers rather than by
//! hand-nesting `Value::cons` calls, so that expectations read like the
//! S-expressions they describe.

use crate::sexpr::error::Error;
use crate::sexpr::reader::{Reader, ReaderConfig};
use crate::sexpr::value::Value;

/// Read the first datum of `source` with the standard grammar
pub fn read_one(source: &str) -> Result<Value, Error> {
    Reader::new(source.as_bytes()).read(&ReaderConfig::default())
}

/// Read every datum of `source` until end of file
pub fn read_all(source: &str) -> Result<Vec<Value>, Error> {
    let config = ReaderConfig::default();
    let mut reader = Reader::new(source.as_bytes());
    let mut values = Vec::new();
    loop {
        match reader.read(&config)? {
            Value::Eof => return Ok(values),
            value => values.push(value),
        }
    }
}

pub fn sym(name: &str) -> Value {
    Value::symbol(name)
}

pub fn int(n: i64) -> Value {
    Value::Integer(n)
}

/// Proper list of the given values
pub fn list<const N: usize>(items: [Value; N]) -> Value {
    Value::list(items)
}

/// Assert that reading `source` fails with the given kind and message
pub fn assert_read_error(source: &str, kind: &str, message: &str) {
    match read_one(source) {
        Ok(value) => panic!("expected {} for {:?}, got {:?}", kind, source, value),
        Err(err) => {
            assert_eq!(err.kind(), kind, "wrong error kind for {:?}", source);
            assert_eq!(err.message(), message, "wrong message for {:?}", source);
        }
    }
}
