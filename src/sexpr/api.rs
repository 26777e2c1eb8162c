//! Port-level entry points
//!
//! These functions take their port as a [`Value`] and check its capability
//! before touching it: reading needs an input port, writing needs an output
//! port. A mismatch is a type error naming the capability, and no I/O
//! happens.

use std::io::Write;

use crate::sexpr::error::Error;
use crate::sexpr::port::{exclusive, Port};
use crate::sexpr::reader::ReaderConfig;
use crate::sexpr::value::Value;
use crate::sexpr::writer::{write_value, Style};

/// Read one datum from an input port, or `Eof` when it is exhausted
pub fn read(port: &Value, config: &ReaderConfig) -> Result<Value, Error> {
    match port {
        Value::Port(Port::Input(reader)) => exclusive(reader, |reader| reader.read(config)),
        other => Err(Error::type_error("input-port", other)),
    }
}

/// Read one datum from `text`
pub fn read_string(text: &str, config: &ReaderConfig) -> Result<Value, Error> {
    read(&Value::Port(Port::string_input(text)), config)
}

/// Read the rest of the current line from an input port
pub fn read_line(port: &Value) -> Result<Value, Error> {
    match port {
        Value::Port(Port::Input(reader)) => exclusive(reader, |reader| reader.read_line()),
        other => Err(Error::type_error("input-port", other)),
    }
}

/// Write `value` in its re-readable form
pub fn write(value: &Value, port: &Value) -> Result<(), Error> {
    emit(value, port, Style::Write)
}

/// Write `value` in its human-readable form
pub fn display(value: &Value, port: &Value) -> Result<(), Error> {
    emit(value, port, Style::Display)
}

fn emit(value: &Value, port: &Value, style: Style) -> Result<(), Error> {
    match port {
        Value::Port(Port::Output(sink)) => exclusive(sink, |sink| {
            write_value(value, sink, style)?;
            sink.flush()?;
            Ok(())
        }),
        other => Err(Error::type_error("output-port", other)),
    }
}
