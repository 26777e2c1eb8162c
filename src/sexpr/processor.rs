//! Source processing for the command line and for tests
//!
//! A processing spec names a stage and an output format, written as
//! `<stage>-<format>`:
//!
//! - `token-simple`: the significant tokens as `<kind:lexeme>` runs
//! - `token-raw-simple`: the same with comments and whitespace kept, broken
//!   after every whitespace token that contains a newline
//! - `token-json`, `token-raw-json`: the same tokens as JSON
//! - `value-write`, `value-display`: every datum read from the source, one
//!   per line, in the chosen writer style
//! - `value-json`, `value-yaml`: every datum as a tree of typed nodes

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::sexpr::error::Error;
use crate::sexpr::formats::ValueNode;
use crate::sexpr::lexer::{tokenize, tokenize_raw, Token};
use crate::sexpr::reader::{Reader, ReaderConfig};
use crate::sexpr::value::Value;
use crate::sexpr::writer::{Printer, Style};

/// What to extract from the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Value,
}

/// How to render what was extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    RawSimple,
    Json,
    RawJson,
    Write,
    Display,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Error)]
pub enum ProcessingError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error(transparent)]
    Read(#[from] Error),
}

impl ProcessingStage {
    pub fn name(self) -> &'static str {
        match self {
            ProcessingStage::Token => "token",
            ProcessingStage::Value => "value",
        }
    }
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::RawSimple => "raw-simple",
            OutputFormat::Json => "json",
            OutputFormat::RawJson => "raw-json",
            OutputFormat::Write => "write",
            OutputFormat::Display => "display",
            OutputFormat::Yaml => "yaml",
        }
    }

    fn is_raw(self) -> bool {
        matches!(self, OutputFormat::RawSimple | OutputFormat::RawJson)
    }
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "value-write"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "value" => ProcessingStage::Value,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "raw-simple" => OutputFormat::RawSimple,
            "json" => OutputFormat::Json,
            "raw-json" => OutputFormat::RawJson,
            "write" => OutputFormat::Write,
            "display" => OutputFormat::Display,
            "yaml" => OutputFormat::Yaml,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        let spec = ProcessingSpec { stage, format };
        if !Self::available_specs().contains(&spec) {
            return Err(ProcessingError::InvalidFormatType(format!(
                "Format '{}' is not supported for the {} stage",
                format.name(),
                stage.name()
            )));
        }
        Ok(spec)
    }

    /// All valid stage and format combinations
    pub fn available_specs() -> Vec<ProcessingSpec> {
        let token = ProcessingStage::Token;
        let value = ProcessingStage::Value;
        [
            (token, OutputFormat::Simple),
            (token, OutputFormat::RawSimple),
            (token, OutputFormat::Json),
            (token, OutputFormat::RawJson),
            (value, OutputFormat::Write),
            (value, OutputFormat::Display),
            (value, OutputFormat::Json),
            (value, OutputFormat::Yaml),
        ]
        .into_iter()
        .map(|(stage, format)| ProcessingSpec { stage, format })
        .collect()
    }

    pub fn name(&self) -> String {
        format!("{}-{}", self.stage.name(), self.format.name())
    }
}

/// Process source text according to the given specification
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    config: &ReaderConfig,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let tokens = if spec.format.is_raw() {
                tokenize_raw(source)?
            } else {
                tokenize(source)?
            };
            let tokens: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
            format_tokens(&tokens, spec.format)
        }
        ProcessingStage::Value => {
            let values = read_all(source, config)?;
            format_values(&values, spec.format)
        }
    }
}

/// Process a file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &ReaderConfig,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(ProcessingError::FileNotFound(
            file_path.display().to_string(),
        ));
    }
    let content =
        fs::read_to_string(file_path).map_err(|e| ProcessingError::IoError(e.to_string()))?;
    process_source(&content, spec, config)
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}

fn read_all(source: &str, config: &ReaderConfig) -> Result<Vec<Value>, Error> {
    let mut reader = Reader::new(source.as_bytes());
    let mut values = Vec::new();
    loop {
        match reader.read(config)? {
            Value::Eof => return Ok(values),
            value => values.push(value),
        }
    }
}

fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => Ok(tokens.iter().map(Token::to_string).collect()),
        OutputFormat::RawSimple => {
            let mut result = String::new();
            for token in tokens {
                result.push_str(&token.to_string());
                if matches!(token, Token::Whitespace(ws) if ws.contains('\n')) {
                    result.push('\n');
                }
            }
            Ok(result)
        }
        OutputFormat::Json | OutputFormat::RawJson => {
            serde_json::to_string_pretty(tokens).map_err(|e| ProcessingError::IoError(e.to_string()))
        }
        other => Err(ProcessingError::InvalidFormatType(format!(
            "{} format only works with the value stage",
            other.name()
        ))),
    }
}

fn format_values(values: &[Value], format: OutputFormat) -> Result<String, ProcessingError> {
    let styled = |style: Style| {
        values
            .iter()
            .map(|value| format!("{}\n", Printer::new(value, style)))
            .collect::<String>()
    };
    let nodes = || values.iter().map(ValueNode::from).collect::<Vec<_>>();

    match format {
        OutputFormat::Write => Ok(styled(Style::Write)),
        OutputFormat::Display => Ok(styled(Style::Display)),
        OutputFormat::Json => serde_json::to_string_pretty(&nodes())
            .map_err(|e| ProcessingError::IoError(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(&nodes()).map_err(|e| ProcessingError::IoError(e.to_string()))
        }
        other => Err(ProcessingError::InvalidFormatType(format!(
            "{} format only works with the token stage",
            other.name()
        ))),
    }
}
