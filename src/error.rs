//! Error types for ferro-iscn
//!
//! This module provides:
//! - Error codes for categorization
//! - Source span tracking for error location
//! - Positional token errors collected from rejected karyotypes
//! - "Did you mean?" suggestions produced by the cleaner

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum ErrorCode {
    // Syntax errors (E1xxx)
    /// Unexpected character
    UnexpectedChar = 1001,
    /// Unexpected end of input
    UnexpectedEnd = 1002,
    /// Invalid chromosome count
    InvalidModalNumber = 1003,
    /// Invalid sex chromosome complement
    InvalidSexChromosomes = 1004,
    /// Unrecognized event
    UnknownEvent = 1005,
    /// Invalid band or breakpoint
    InvalidBand = 1006,
    /// Unbalanced parentheses
    UnbalancedParentheses = 1007,
    /// Invalid cell count
    InvalidCellCount = 1008,

    // Validation errors (E3xxx)
    /// Chromosome not present in the band index
    UnknownChromosome = 3001,
    /// Band groups do not match the chromosome list
    BreakpointMismatch = 3002,

    // Configuration errors (E9xxx)
    /// Configuration file could not be read
    ConfigIo = 9001,
    /// Configuration file could not be parsed
    ConfigParse = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedChar => "unexpected character",
            ErrorCode::UnexpectedEnd => "unexpected end of input",
            ErrorCode::InvalidModalNumber => "invalid chromosome count",
            ErrorCode::InvalidSexChromosomes => "invalid sex chromosome complement",
            ErrorCode::UnknownEvent => "unrecognized karyotype event",
            ErrorCode::InvalidBand => "invalid band or breakpoint",
            ErrorCode::UnbalancedParentheses => "unbalanced parentheses",
            ErrorCode::InvalidCellCount => "invalid cell count",
            ErrorCode::UnknownChromosome => "unknown chromosome",
            ErrorCode::BreakpointMismatch => "breakpoints do not match chromosomes",
            ErrorCode::ConfigIo => "configuration I/O error",
            ErrorCode::ConfigParse => "configuration parse error",
        }
    }

    /// True for lexer/parser failures.
    pub fn is_syntax(&self) -> bool {
        (*self as u16) < 2000
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A span in the source input indicating error location
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SourceSpan {
    /// Starting byte offset (0-indexed)
    pub start: usize,
    /// Ending byte offset (exclusive)
    pub end: usize,
}

impl SourceSpan {
    /// Create a new source span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a span for a single position
    pub fn point(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Format the source with the error highlighted
    ///
    /// Returns a string like:
    /// ```text
    /// 46,XX,del(5)(q13q31
    ///       ^~~~~~~~~~~~~
    /// ```
    pub fn highlight(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }

        let safe_start = self.start.min(source.len());
        let safe_end = self.end.min(source.len()).max(safe_start);

        let mut pointer = " ".repeat(safe_start);
        pointer.push('^');
        if safe_end > safe_start + 1 {
            pointer.push_str(&"~".repeat(safe_end - safe_start - 1));
        }

        format!("{}\n{}", source, pointer)
    }
}

/// A positional error for one offending token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenError {
    /// Error code
    pub code: ErrorCode,
    /// Location of the offending substring
    pub span: SourceSpan,
    /// The offending substring
    pub token: String,
    /// Human-readable message
    pub message: String,
}

impl TokenError {
    /// Create a new token error
    pub fn new(
        code: ErrorCode,
        span: SourceSpan,
        token: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            span,
            token: token.into(),
            message: message.into(),
        }
    }

    /// Format the error against its source
    pub fn format(&self, source: &str) -> String {
        format!(
            "[{}] {} at {}: '{}'\n\n{}",
            self.code,
            self.message,
            self.span.start,
            self.token,
            self.span.highlight(source)
        )
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} at position {}: '{}'",
            self.code, self.message, self.span.start, self.token
        )
    }
}

/// Structured syntax rejection of a karyotype string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxFailure {
    /// The text handed to the grammar
    pub input: String,
    /// Positional token errors
    pub errors: Vec<TokenError>,
    /// A cleaned rewrite that parses, offered for information only
    pub suggestion: Option<String>,
}

impl SyntaxFailure {
    /// Create a failure with no suggestion
    pub fn new(input: impl Into<String>, errors: Vec<TokenError>) -> Self {
        Self {
            input: input.into(),
            errors,
            suggestion: None,
        }
    }

    /// One-line summary of the token errors
    pub fn summary(&self) -> String {
        if self.errors.is_empty() {
            return "rejected by grammar".to_string();
        }
        self.errors
            .iter()
            .map(|e| format!("'{}' {}", e.token, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Detailed multi-line report with highlights and the suggestion
    pub fn report(&self) -> String {
        let mut out = String::new();
        for error in &self.errors {
            out.push_str(&error.format(&self.input));
            out.push_str("\n\n");
        }
        if let Some(suggestion) = &self.suggestion {
            out.push_str("Did you mean: ");
            out.push_str(suggestion);
        }
        out.trim_end().to_string()
    }
}

/// Main error type for ferro-iscn operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IscnError {
    /// The grammar rejected the karyotype
    #[error("Syntax error in '{}': {}", .0.input, .0.summary())]
    Syntax(SyntaxFailure),

    /// A parsed event failed semantic validation
    #[error("Invalid event '{event}': {msg}")]
    Validation {
        code: ErrorCode,
        event: String,
        msg: String,
    },

    /// Configuration could not be loaded
    #[error("Config error: {msg}")]
    Config { code: ErrorCode, msg: String },
}

impl IscnError {
    /// Create a validation error
    pub fn validation(code: ErrorCode, event: impl Into<String>, msg: impl Into<String>) -> Self {
        IscnError::Validation {
            code,
            event: event.into(),
            msg: msg.into(),
        }
    }

    /// True for lexer/parser rejection
    pub fn is_syntax(&self) -> bool {
        matches!(self, IscnError::Syntax(_))
    }

    /// True for semantic validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, IscnError::Validation { .. })
    }

    /// The error code, when there is a single one
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            IscnError::Syntax(failure) => failure.errors.first().map(|e| e.code),
            IscnError::Validation { code, .. } | IscnError::Config { code, .. } => Some(*code),
        }
    }

    /// The syntax failure, if this is one
    pub fn syntax_failure(&self) -> Option<&SyntaxFailure> {
        match self {
            IscnError::Syntax(failure) => Some(failure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::UnexpectedChar.as_str(), "E1001");
        assert_eq!(ErrorCode::UnknownChromosome.to_string(), "E3001");
        assert!(ErrorCode::InvalidBand.is_syntax());
        assert!(!ErrorCode::BreakpointMismatch.is_syntax());
    }

    #[test]
    fn test_span_highlight() {
        let span = SourceSpan::new(6, 9);
        assert_eq!(span.highlight("46,XX,+7x"), "46,XX,+7x\n      ^~~");
        assert_eq!(SourceSpan::point(0).highlight("x"), "x\n^");
        assert_eq!(SourceSpan::new(50, 60).highlight("ab"), "ab\n  ^");
        assert_eq!(SourceSpan::point(0).highlight(""), "");
    }

    #[test]
    fn test_syntax_failure_summary() {
        let failure = SyntaxFailure::new(
            "46,XX,foo",
            vec![TokenError::new(
                ErrorCode::UnknownEvent,
                SourceSpan::new(6, 9),
                "foo",
                "unrecognized event",
            )],
        );
        assert_eq!(failure.summary(), "'foo' unrecognized event");
        let err = IscnError::Syntax(failure);
        assert!(err.is_syntax());
        assert_eq!(err.code(), Some(ErrorCode::UnknownEvent));
        assert!(err.to_string().contains("46,XX,foo"));
    }

    #[test]
    fn test_validation_error() {
        let err = IscnError::validation(ErrorCode::UnknownChromosome, "+25", "chromosome 25");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Invalid event '+25': chromosome 25");
    }
}
