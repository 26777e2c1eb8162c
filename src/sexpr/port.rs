//! Ports: values that carry a read or write capability
//!
//! An input port owns a [`Reader`] (its source plus any text buffered but not
//! yet consumed), so successive reads through the same port continue where
//! the previous one stopped. An output port owns a [`Sink`]. Ports are shared
//! handles; a port must not be used by two reads or writes at once, and an
//! attempt to do so is reported as a system error.

use crate::sexpr::error::Error;
use crate::sexpr::reader::Reader;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, BufRead, BufReader, Cursor, Read, Write};
use std::rc::Rc;

/// Buffered source type held by input ports
pub type Source = Box<dyn BufRead>;

/// Destination of an output port
pub enum Sink {
    Stream(Box<dyn Write>),
    /// In-memory sink whose contents can be inspected
    Buffer(Vec<u8>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stream(stream) => stream.write(buf),
            Sink::Buffer(bytes) => bytes.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stream(stream) => stream.flush(),
            Sink::Buffer(_) => Ok(()),
        }
    }
}

#[derive(Clone)]
pub enum Port {
    Input(Rc<RefCell<Reader<Source>>>),
    Output(Rc<RefCell<Sink>>),
}

impl Port {
    /// Input port over any byte source
    pub fn input<R: Read + 'static>(source: R) -> Self {
        Port::buffered_input(BufReader::new(source))
    }

    /// Input port over an already buffered source
    pub fn buffered_input<R: BufRead + 'static>(source: R) -> Self {
        let source: Source = Box::new(source);
        Port::Input(Rc::new(RefCell::new(Reader::new(source))))
    }

    /// Input port over an in-memory string
    pub fn string_input(text: &str) -> Self {
        Port::buffered_input(Cursor::new(text.to_owned().into_bytes()))
    }

    /// Output port writing to any byte sink
    pub fn output<W: Write + 'static>(sink: W) -> Self {
        Port::Output(Rc::new(RefCell::new(Sink::Stream(Box::new(sink)))))
    }

    /// Output port collecting everything written into memory
    pub fn string_output() -> Self {
        Port::Output(Rc::new(RefCell::new(Sink::Buffer(Vec::new()))))
    }

    /// Text collected so far by a [`Port::string_output`] port
    pub fn output_string(&self) -> Option<String> {
        match self {
            Port::Output(sink) => match &*sink.borrow() {
                Sink::Buffer(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
                Sink::Stream(_) => None,
            },
            Port::Input(_) => None,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Port::Input(_))
    }

    pub fn is_output(&self) -> bool {
        matches!(self, Port::Output(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Port::Input(_) => "input-port",
            Port::Output(_) => "output-port",
        }
    }

    pub fn ptr_eq(&self, other: &Port) -> bool {
        match (self, other) {
            (Port::Input(a), Port::Input(b)) => Rc::ptr_eq(a, b),
            (Port::Output(a), Port::Output(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Run `f` with exclusive access to a shared port cell
pub(crate) fn exclusive<T, R>(
    cell: &RefCell<T>,
    f: impl FnOnce(&mut T) -> Result<R, Error>,
) -> Result<R, Error> {
    let mut guard = cell
        .try_borrow_mut()
        .map_err(|_| Error::System("port is already in use".to_string()))?;
    f(&mut guard)
}

impl fmt::Debug for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<{}>", self.kind_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_output_collects_text() {
        let port = Port::string_output();
        if let Port::Output(sink) = &port {
            sink.borrow_mut().write_all(b"hello").unwrap();
        }
        assert_eq!(port.output_string().as_deref(), Some("hello"));
    }

    #[test]
    fn test_stream_output_has_no_contents() {
        let port = Port::output(io::sink());
        assert_eq!(port.output_string(), None);
        assert!(port.is_output());
    }

    #[test]
    fn test_identity() {
        let a = Port::string_input("x");
        let b = Port::string_input("x");
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
        assert_eq!(a.kind_name(), "input-port");
    }

    #[test]
    fn test_exclusive_detects_reentrant_use() {
        let cell = RefCell::new(0);
        let result = exclusive(&cell, |_| exclusive(&cell, |_| Ok(())));
        let err = result.unwrap_err();
        assert_eq!(err.kind(), "system-error");
    }
}
