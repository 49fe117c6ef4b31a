//! Karyotype cleaner.
//!
//! The cleaner applies corrections for common input mistakes, based on the
//! configured error handling mode. Its output is only ever offered as a
//! suggestion for a karyotype the grammar rejected.

use log::warn;

use super::corrections::{correct, DetectedCorrection};
use super::types::{ErrorType, ResolvedAction};
use super::{Cleaner, ErrorConfig};
use crate::error::{ErrorCode, SourceSpan, TokenError};

/// Warning about a correction made during cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionWarning {
    /// The type of error that was corrected.
    pub error_type: ErrorType,
    /// Human-readable message about the correction.
    pub message: String,
    /// Position in the cleaned-so-far input (start, end).
    pub span: Option<(usize, usize)>,
    /// The original value that was corrected.
    pub original: String,
    /// The corrected value.
    pub corrected: String,
}

impl CorrectionWarning {
    /// Create from a DetectedCorrection.
    pub fn from_correction(correction: &DetectedCorrection) -> Self {
        Self {
            error_type: correction.error_type,
            message: correction.warning_message(),
            span: Some((correction.start, correction.end)),
            original: correction.original.clone(),
            corrected: correction.corrected.clone(),
        }
    }
}

/// Result of cleaning an input string.
#[derive(Debug, Clone)]
pub struct CleanResult {
    /// The original input.
    pub original: String,
    /// The cleaned input (same as original if nothing was corrected).
    pub cleaned: String,
    /// Warnings generated during cleaning.
    pub warnings: Vec<CorrectionWarning>,
    /// Whether cleaning was successful (no rejected mistakes).
    pub success: bool,
    /// The first rejected mistake, if any.
    pub error: Option<TokenError>,
}

impl CleanResult {
    fn failed(original: &str, error: TokenError) -> Self {
        Self {
            original: original.to_string(),
            cleaned: original.to_string(),
            warnings: Vec::new(),
            success: false,
            error: Some(error),
        }
    }

    /// Returns true if there were any corrections made.
    pub fn has_corrections(&self) -> bool {
        self.original != self.cleaned
    }

    /// Returns true if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Cleaner that rewrites common karyotype mistakes.
#[derive(Debug, Clone, Default)]
pub struct KaryotypeCleaner {
    config: ErrorConfig,
}

impl KaryotypeCleaner {
    /// Create a new cleaner with the given configuration.
    pub fn new(config: ErrorConfig) -> Self {
        Self { config }
    }

    /// Create a cleaner with strict mode.
    pub fn strict() -> Self {
        Self::new(ErrorConfig::strict())
    }

    /// Create a cleaner with lenient mode.
    pub fn lenient() -> Self {
        Self::new(ErrorConfig::lenient())
    }

    /// Create a cleaner with silent mode.
    pub fn silent() -> Self {
        Self::new(ErrorConfig::silent())
    }

    /// The configuration in use.
    pub fn config(&self) -> &ErrorConfig {
        &self.config
    }

    /// Clean the input string, phase by phase.
    pub fn clean_with_warnings(&self, input: &str) -> CleanResult {
        let mut current = input.to_string();
        let mut warnings = Vec::new();

        for error_type in ErrorType::ALL {
            let (corrected, corrections) = correct(error_type, &current);
            let Some(first) = corrections.first() else {
                continue;
            };
            match self.config.action_for(error_type) {
                ResolvedAction::Reject => {
                    return CleanResult::failed(input, rejection(first));
                }
                ResolvedAction::WarnCorrect => {
                    for c in &corrections {
                        let warning = CorrectionWarning::from_correction(c);
                        warn!("{}", warning.message);
                        warnings.push(warning);
                    }
                    current = corrected;
                }
                ResolvedAction::SilentCorrect => current = corrected,
                ResolvedAction::Accept => {}
            }
        }

        CleanResult {
            original: input.to_string(),
            cleaned: current,
            warnings,
            success: true,
            error: None,
        }
    }
}

impl Cleaner for KaryotypeCleaner {
    fn clean(&self, text: &str) -> Option<String> {
        let result = self.clean_with_warnings(text);
        (result.success && result.has_corrections()).then_some(result.cleaned)
    }
}

fn rejection(correction: &DetectedCorrection) -> TokenError {
    let code = match correction.error_type {
        ErrorType::UppercaseKeyword => ErrorCode::UnknownEvent,
        ErrorType::LowercaseSexChromosome => ErrorCode::InvalidSexChromosomes,
        ErrorType::UnbalancedParentheses => ErrorCode::UnbalancedParentheses,
        ErrorType::UnterminatedCellCount => ErrorCode::InvalidCellCount,
        ErrorType::WrongDashCharacter
        | ErrorType::WrongArrow
        | ErrorType::ExtraWhitespace
        | ErrorType::CommaInParentheses
        | ErrorType::TrailingSeparator => ErrorCode::UnexpectedChar,
    };
    TokenError::new(
        code,
        SourceSpan::new(correction.start, correction.end.max(correction.start + 1)),
        correction.original.clone(),
        correction.error_type.description(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ErrorOverride;

    #[test]
    fn test_lenient_cleans_with_warnings() {
        let result = KaryotypeCleaner::lenient().clean_with_warnings("46, xx, DEL(5)(q13q31");
        assert!(result.success);
        assert_eq!(result.cleaned, "46,XX,del(5)(q13q31)");
        assert!(result.has_warnings());
        assert_eq!(result.warnings[0].error_type, ErrorType::ExtraWhitespace);
    }

    #[test]
    fn test_silent_cleans_without_warnings() {
        let result = KaryotypeCleaner::silent().clean_with_warnings("46,XY,t(9,22)(q34,q11),");
        assert!(result.success);
        assert_eq!(result.cleaned, "46,XY,t(9;22)(q34;q11)");
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_strict_rejects() {
        let result = KaryotypeCleaner::strict().clean_with_warnings("45,XX,\u{2013}7");
        assert!(!result.success);
        let error = result.error.unwrap();
        assert_eq!(error.code, ErrorCode::UnexpectedChar);
        assert_eq!(error.span.start, 6);
        assert_eq!(KaryotypeCleaner::strict().clean("45,XX,\u{2013}7"), None);
    }

    #[test]
    fn test_clean_returns_none_when_unchanged() {
        assert_eq!(KaryotypeCleaner::lenient().clean("46,XX"), None);
        assert_eq!(KaryotypeCleaner::lenient().clean("46,XX,foo"), None);
    }

    #[test]
    fn test_override_reject_in_lenient() {
        let cleaner = KaryotypeCleaner::new(
            ErrorConfig::lenient().with_override(ErrorType::WrongArrow, ErrorOverride::Reject),
        );
        let result = cleaner.clean_with_warnings("der(7)(7pter=>7q11)");
        assert!(!result.success);
    }

    #[test]
    fn test_override_accept_keeps_original() {
        let cleaner = KaryotypeCleaner::new(
            ErrorConfig::lenient().with_override(ErrorType::ExtraWhitespace, ErrorOverride::Accept),
        );
        let result = cleaner.clean_with_warnings("46, XX");
        assert!(result.success);
        assert_eq!(result.cleaned, "46, XX");
    }

    #[test]
    fn test_override_correct_in_strict() {
        let cleaner = KaryotypeCleaner::new(
            ErrorConfig::strict()
                .with_override(ErrorType::UppercaseKeyword, ErrorOverride::SilentCorrect),
        );
        assert_eq!(
            cleaner.clean("46,XX,DEL(5)(q13q31)").as_deref(),
            Some("46,XX,del(5)(q13q31)")
        );
    }
}
