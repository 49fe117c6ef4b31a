//! Core types for error handling modes.
//!
//! This module defines the error mode, error type, and override enums
//! used for configurable karyotype cleaning.

use serde::Deserialize;
use std::fmt;

/// Error handling mode.
///
/// Controls how the cleaner handles common input mistakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// Reject all non-standard input.
    ///
    /// The cleaner never rewrites anything, so rejected karyotypes carry no
    /// suggestion.
    Strict,

    /// Auto-correct common mistakes with warnings.
    #[default]
    Lenient,

    /// Auto-correct silently without warnings.
    Silent,
}

impl ErrorMode {
    /// Returns true if this mode should reject non-standard input.
    pub fn is_strict(&self) -> bool {
        matches!(self, ErrorMode::Strict)
    }

    /// Returns true if this mode allows auto-correction.
    pub fn allows_correction(&self) -> bool {
        matches!(self, ErrorMode::Lenient | ErrorMode::Silent)
    }

    /// Returns true if this mode should emit warnings.
    pub fn emits_warnings(&self) -> bool {
        matches!(self, ErrorMode::Lenient)
    }
}

impl fmt::Display for ErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMode::Strict => write!(f, "strict"),
            ErrorMode::Lenient => write!(f, "lenient"),
            ErrorMode::Silent => write!(f, "silent"),
        }
    }
}

/// Individual error type that can be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Uppercase or mixed-case event keyword (e.g., `DEL(5)` instead of `del(5)`).
    UppercaseKeyword,

    /// Lowercase sex chromosomes (e.g., `46,xx` instead of `46,XX`).
    LowercaseSexChromosome,

    /// Wrong dash character (en-dash, em-dash or minus sign instead of hyphen).
    WrongDashCharacter,

    /// Wrong arrow in a detailed formula (`→`, `-->`, `=>` instead of `->`).
    WrongArrow,

    /// Whitespace inside the karyotype.
    ExtraWhitespace,

    /// Comma separating chromosomes inside parentheses (e.g., `t(9,22)`).
    CommaInParentheses,

    /// Missing closing parentheses.
    UnbalancedParentheses,

    /// Trailing `,`, `.` or `;`.
    TrailingSeparator,

    /// Cell count without its closing bracket (e.g., `[10`).
    UnterminatedCellCount,
}

impl ErrorType {
    /// All configurable error types, in cleaning order.
    pub const ALL: [ErrorType; 9] = [
        ErrorType::ExtraWhitespace,
        ErrorType::WrongDashCharacter,
        ErrorType::WrongArrow,
        ErrorType::UppercaseKeyword,
        ErrorType::LowercaseSexChromosome,
        ErrorType::TrailingSeparator,
        ErrorType::UnterminatedCellCount,
        ErrorType::UnbalancedParentheses,
        ErrorType::CommaInParentheses,
    ];

    /// Returns the warning code (W-code) for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorType::UppercaseKeyword => "W1001",
            ErrorType::LowercaseSexChromosome => "W1002",
            ErrorType::WrongDashCharacter => "W2001",
            ErrorType::WrongArrow => "W2002",
            ErrorType::ExtraWhitespace => "W2003",
            ErrorType::CommaInParentheses => "W3001",
            ErrorType::UnbalancedParentheses => "W3002",
            ErrorType::TrailingSeparator => "W3003",
            ErrorType::UnterminatedCellCount => "W3004",
        }
    }

    /// Look up an error type by its W-code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Returns a human-readable description of this error type.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorType::UppercaseKeyword => "uppercase event keyword",
            ErrorType::LowercaseSexChromosome => "lowercase sex chromosomes",
            ErrorType::WrongDashCharacter => "wrong dash character",
            ErrorType::WrongArrow => "wrong arrow in detailed formula",
            ErrorType::ExtraWhitespace => "extra whitespace",
            ErrorType::CommaInParentheses => "comma used as chromosome separator",
            ErrorType::UnbalancedParentheses => "unbalanced parentheses",
            ErrorType::TrailingSeparator => "trailing separator",
            ErrorType::UnterminatedCellCount => "unterminated cell count",
        }
    }

    /// Returns an example of this error type for documentation.
    pub fn example(&self) -> (&'static str, &'static str) {
        match self {
            ErrorType::UppercaseKeyword => ("46,XX,DEL(5)(q13q31)", "46,XX,del(5)(q13q31)"),
            ErrorType::LowercaseSexChromosome => ("46,xy,+8", "46,XY,+8"),
            ErrorType::WrongDashCharacter => ("45,XX,\u{2013}7", "45,XX,-7"),
            ErrorType::WrongArrow => ("der(7)(7pter\u{2192}7q11)", "der(7)(7pter->7q11)"),
            ErrorType::ExtraWhitespace => ("46, XX, +8", "46,XX,+8"),
            ErrorType::CommaInParentheses => {
                ("46,XY,t(9,22)(q34,q11)", "46,XY,t(9;22)(q34;q11)")
            }
            ErrorType::UnbalancedParentheses => ("46,XX,del(5)(q13q31", "46,XX,del(5)(q13q31)"),
            ErrorType::TrailingSeparator => ("46,XX,+8,", "46,XX,+8"),
            ErrorType::UnterminatedCellCount => ("46,XX[20", "46,XX[20]"),
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Per-error-type override behavior.
///
/// Allows overriding the default mode behavior for specific error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorOverride {
    /// Use the default mode behavior.
    #[default]
    Default,

    /// Always reject this error type.
    Reject,

    /// Always warn and correct.
    WarnCorrect,

    /// Always correct silently.
    SilentCorrect,

    /// Always accept as-is without correction.
    Accept,
}

impl ErrorOverride {
    /// Resolve this override to an effective action given the base mode.
    pub fn resolve(&self, mode: ErrorMode) -> ResolvedAction {
        match self {
            ErrorOverride::Default => match mode {
                ErrorMode::Strict => ResolvedAction::Reject,
                ErrorMode::Lenient => ResolvedAction::WarnCorrect,
                ErrorMode::Silent => ResolvedAction::SilentCorrect,
            },
            ErrorOverride::Reject => ResolvedAction::Reject,
            ErrorOverride::WarnCorrect => ResolvedAction::WarnCorrect,
            ErrorOverride::SilentCorrect => ResolvedAction::SilentCorrect,
            ErrorOverride::Accept => ResolvedAction::Accept,
        }
    }
}

impl fmt::Display for ErrorOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorOverride::Default => write!(f, "default"),
            ErrorOverride::Reject => write!(f, "reject"),
            ErrorOverride::WarnCorrect => write!(f, "warn+correct"),
            ErrorOverride::SilentCorrect => write!(f, "silent correct"),
            ErrorOverride::Accept => write!(f, "accept"),
        }
    }
}

/// Resolved action after applying mode and override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedAction {
    /// Reject the input with an error.
    Reject,
    /// Correct the input and emit a warning.
    WarnCorrect,
    /// Correct the input silently.
    SilentCorrect,
    /// Accept the input as-is.
    Accept,
}

impl ResolvedAction {
    /// Returns true if this action should reject the input.
    pub fn should_reject(&self) -> bool {
        matches!(self, ResolvedAction::Reject)
    }

    /// Returns true if this action should correct the input.
    pub fn should_correct(&self) -> bool {
        matches!(
            self,
            ResolvedAction::WarnCorrect | ResolvedAction::SilentCorrect
        )
    }

    /// Returns true if this action should emit a warning.
    pub fn should_warn(&self) -> bool {
        matches!(self, ResolvedAction::WarnCorrect)
    }
}
