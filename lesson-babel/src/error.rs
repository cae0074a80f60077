//! Error types for format operations

use crate::common::tree_builder::BuildError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No format registered under this name
    FormatNotFound(String),
    /// No format claims this file's extension
    UndetectedFormat(String),
    ParseError(String),
    SerializationError(String),
    /// The format does not read, or does not write
    NotSupported(String),
    /// A `--extra-*` style option the format rejects. `value` is `None` when
    /// the key itself is unknown.
    InvalidOption {
        format: String,
        key: String,
        value: Option<String>,
    },
}

impl FormatError {
    pub(crate) fn unknown_option(format: &str, key: &str) -> Self {
        FormatError::InvalidOption {
            format: format.to_string(),
            key: key.to_string(),
            value: None,
        }
    }

    pub(crate) fn bad_option_value(format: &str, key: &str, value: &str) -> Self {
        FormatError::InvalidOption {
            format: format.to_string(),
            key: key.to_string(),
            value: Some(value.to_string()),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::UndetectedFormat(path) => {
                write!(f, "Could not detect format from filename '{path}'")
            }
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
            FormatError::InvalidOption {
                format,
                key,
                value: None,
            } => write!(f, "Format '{format}' does not support parameter '{key}'"),
            FormatError::InvalidOption {
                format,
                key,
                value: Some(value),
            } => write!(f, "Invalid value '{value}' for '{key}' in format '{format}'"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<BuildError> for FormatError {
    fn from(err: BuildError) -> Self {
        FormatError::ParseError(format!("unbalanced token stream: {err}"))
    }
}
