//! Main module for the S-expression reader and writer

pub mod api;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod port;
pub mod processor;
pub mod reader;
pub mod value;
pub mod writer;

#[cfg(test)]
pub mod testing;
