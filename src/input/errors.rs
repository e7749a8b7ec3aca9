//! Input error types
//!
//! Error codes:
//! - ELIM_INPUT_UNREADABLE
//! - ELIM_MALFORMED_RECORD
//! - ELIM_NEGATIVE_VALUE
//! - ELIM_COUNT_MISMATCH

use std::fmt;
use std::io;

/// Input-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorCode {
    /// Source could not be opened or read
    InputUnreadable,
    /// Record or count line does not match the c.e format
    MalformedRecord,
    /// Elimination time or size factor below zero
    NegativeValue,
    /// Declared label count differs from the records found
    CountMismatch,
}

impl ParseErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorCode::InputUnreadable => "ELIM_INPUT_UNREADABLE",
            ParseErrorCode::MalformedRecord => "ELIM_MALFORMED_RECORD",
            ParseErrorCode::NegativeValue => "ELIM_NEGATIVE_VALUE",
            ParseErrorCode::CountMismatch => "ELIM_COUNT_MISMATCH",
        }
    }
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error raised while materializing a label store
#[derive(Debug)]
pub struct ParseError {
    code: ParseErrorCode,
    message: String,
    /// 1-based line number, if the error is tied to a line
    line: Option<usize>,
    source: Option<io::Error>,
}

impl ParseError {
    /// Source could not be opened or read
    pub fn unreadable(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: ParseErrorCode::InputUnreadable,
            message: message.into(),
            line: None,
            source: Some(source),
        }
    }

    /// Path handed over a foreign boundary is unusable
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self {
            code: ParseErrorCode::InputUnreadable,
            message: message.into(),
            line: None,
            source: None,
        }
    }

    /// Malformed record or count line
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            code: ParseErrorCode::MalformedRecord,
            message: reason.into(),
            line: None,
            source: None,
        }
    }

    /// Negative elimination time or size factor
    pub fn negative_value(field: &str, value: f64) -> Self {
        Self {
            code: ParseErrorCode::NegativeValue,
            message: format!("{} must be >= 0, got {}", field, value),
            line: None,
            source: None,
        }
    }

    /// Header count does not match the records
    pub fn count_mismatch(declared: usize, found: usize) -> Self {
        Self {
            code: ParseErrorCode::CountMismatch,
            message: format!(
                "Specified number of labels ({}) does not match the {} records found",
                declared, found
            ),
            line: None,
            source: None,
        }
    }

    /// Attach the 1-based number of the offending line
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn code(&self) -> ParseErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.code)?;
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        write!(f, "{}", self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for input operations
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ParseErrorCode::InputUnreadable.code(), "ELIM_INPUT_UNREADABLE");
        assert_eq!(ParseErrorCode::MalformedRecord.code(), "ELIM_MALFORMED_RECORD");
        assert_eq!(ParseErrorCode::NegativeValue.code(), "ELIM_NEGATIVE_VALUE");
        assert_eq!(ParseErrorCode::CountMismatch.code(), "ELIM_COUNT_MISMATCH");
    }

    #[test]
    fn test_display_with_line() {
        let err = ParseError::malformed("expected 8 fields").at_line(7);
        assert_eq!(err.line(), Some(7));
        assert_eq!(
            err.to_string(),
            "ELIM_MALFORMED_RECORD: line 7: expected 8 fields"
        );
    }

    #[test]
    fn test_display_with_source() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = ParseError::unreadable("Failed to open a.ce", io_err);
        let display = err.to_string();

        assert!(display.contains("ELIM_INPUT_UNREADABLE"));
        assert!(display.contains("no such file"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_at_line() {
        let err = ParseError::negative_value("elimination time", -1.0);
        assert_eq!(err.line(), None);

        let err = err.at_line(12);
        assert_eq!(err.line(), Some(12));
        assert_eq!(err.code(), ParseErrorCode::NegativeValue);
    }
}
