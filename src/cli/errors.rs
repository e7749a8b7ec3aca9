//! CLI-specific error types
//!
//! Errors of the library keep their own codes; the CLI only adds codes for
//! bad arguments and broken output streams.

use std::fmt;
use std::io;

use crate::boundary::{BoundaryError, InitError};
use crate::config::ConfigError;
use crate::index::IndexError;
use crate::input::ParseError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Argument could not be interpreted
    InvalidArgument,
    /// I/O error (stdout)
    IoError,
    /// Error raised by the library, with its own code
    Library(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "ELIM_CLI_INVALID_ARGUMENT",
            Self::IoError => "ELIM_CLI_IO_ERROR",
            Self::Library(code) => *code,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Invalid argument
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Wrap a library error whose display reads `CODE: message`
    fn library(code: &'static str, display: String) -> Self {
        let message = match display
            .strip_prefix(code)
            .and_then(|rest| rest.strip_prefix(": "))
        {
            Some(rest) => rest.to_string(),
            None => display.clone(),
        };
        Self::new(CliErrorCode::Library(code), message)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(CliErrorCode::Library(e.code().code()), e.message())
    }
}

impl From<&InitError> for CliError {
    fn from(e: &InitError) -> Self {
        Self::library(e.code(), e.to_string())
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        Self::from(&InitError::from(e))
    }
}

impl From<IndexError> for CliError {
    fn from(e: IndexError) -> Self {
        Self::new(CliErrorCode::Library(e.code().code()), e.message())
    }
}

impl From<BoundaryError> for CliError {
    fn from(e: BoundaryError) -> Self {
        Self::library(e.code(), e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
