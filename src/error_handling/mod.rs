//! Configurable error handling for karyotype input.
//!
//! This module provides three error handling modes (Strict, Lenient, Silent)
//! plus per-error-type configuration overrides. The modes control how the
//! cleaner treats common input mistakes like lowercase sex chromosomes,
//! uppercase event keywords, and commas used in place of semicolons.
//!
//! The cleaner never changes what gets interpreted: a rewrite is only offered
//! as a suggestion on a syntax failure.
//!
//! # Example
//!
//! ```
//! use ferro_iscn::error_handling::{ErrorConfig, ErrorMode, ErrorType, ErrorOverride};
//!
//! // Strict mode: never rewrite anything
//! let config = ErrorConfig::strict();
//!
//! // Lenient mode (default): auto-correct with warnings
//! let config = ErrorConfig::lenient();
//! assert_eq!(config.mode, ErrorMode::Lenient);
//!
//! // Custom: lenient mode but leave whitespace alone
//! let config = ErrorConfig::lenient()
//!     .with_override(ErrorType::ExtraWhitespace, ErrorOverride::Accept);
//! ```
//!
//! # Error Types
//!
//! | Error Type | Example | Description |
//! |------------|---------|-------------|
//! | `UppercaseKeyword` | `DEL(5)` → `del(5)` | Event keyword not in lowercase |
//! | `LowercaseSexChromosome` | `46,xx` → `46,XX` | Lowercase sex chromosomes |
//! | `WrongDashCharacter` | `–7` → `-7` | En-dash/em-dash instead of hyphen |
//! | `WrongArrow` | `→` → `->` | Non-standard arrow in a detailed formula |
//! | `ExtraWhitespace` | `46, XX` → `46,XX` | Whitespace anywhere in the karyotype |
//! | `CommaInParentheses` | `t(9,22)` → `t(9;22)` | Comma as chromosome separator |
//! | `UnbalancedParentheses` | `del(5)(q13q31` → `del(5)(q13q31)` | Missing `)` |
//! | `TrailingSeparator` | `+8,` → `+8` | Dangling `,`, `.` or `;` |
//! | `UnterminatedCellCount` | `[20` → `[20]` | Missing `]` |
//!
//! # Override Behaviors
//!
//! - `Default`: Use the base mode's behavior
//! - `Reject`: Never correct this mistake
//! - `WarnCorrect`: Auto-correct and emit a warning
//! - `SilentCorrect`: Auto-correct without warning
//! - `Accept`: Leave the input as-is

mod cleaner;
pub mod corrections;
mod types;

pub use cleaner::{CleanResult, CorrectionWarning, KaryotypeCleaner};
pub use corrections::DetectedCorrection;
pub use types::{ErrorMode, ErrorOverride, ErrorType, ResolvedAction};

use std::collections::HashMap;

/// Rewrites a karyotype the grammar rejected into a form it might accept.
///
/// Returns `None` when nothing could be (or may be) rewritten.
pub trait Cleaner {
    fn clean(&self, text: &str) -> Option<String>;
}

/// Error handling configuration.
///
/// The configuration consists of a base mode plus optional per-error-type
/// overrides.
#[derive(Debug, Clone)]
pub struct ErrorConfig {
    /// Base error handling mode.
    pub mode: ErrorMode,
    /// Per-error-type overrides.
    pub overrides: HashMap<ErrorType, ErrorOverride>,
}

impl ErrorConfig {
    /// Create a new configuration with the given mode.
    pub fn new(mode: ErrorMode) -> Self {
        Self {
            mode,
            overrides: HashMap::new(),
        }
    }

    /// Create a strict configuration.
    pub fn strict() -> Self {
        Self::new(ErrorMode::Strict)
    }

    /// Create a lenient configuration.
    pub fn lenient() -> Self {
        Self::new(ErrorMode::Lenient)
    }

    /// Create a silent configuration.
    pub fn silent() -> Self {
        Self::new(ErrorMode::Silent)
    }

    /// Add an override for a specific error type.
    ///
    /// # Example
    ///
    /// ```
    /// use ferro_iscn::error_handling::{ErrorConfig, ErrorType, ErrorOverride};
    ///
    /// let config = ErrorConfig::strict()
    ///     .with_override(ErrorType::LowercaseSexChromosome, ErrorOverride::SilentCorrect);
    /// assert!(config.should_correct(ErrorType::LowercaseSexChromosome));
    /// assert!(config.should_reject(ErrorType::WrongArrow));
    /// ```
    pub fn with_override(mut self, error_type: ErrorType, override_: ErrorOverride) -> Self {
        self.overrides.insert(error_type, override_);
        self
    }

    /// Set an override for a specific error type.
    pub fn set_override(&mut self, error_type: ErrorType, override_: ErrorOverride) {
        self.overrides.insert(error_type, override_);
    }

    /// Remove an override for a specific error type.
    pub fn remove_override(&mut self, error_type: ErrorType) {
        self.overrides.remove(&error_type);
    }

    /// Get the resolved action for an error type.
    pub fn action_for(&self, error_type: ErrorType) -> ResolvedAction {
        let override_ = self.overrides.get(&error_type).copied().unwrap_or_default();
        override_.resolve(self.mode)
    }

    /// Returns true if the given error type should be rejected.
    pub fn should_reject(&self, error_type: ErrorType) -> bool {
        self.action_for(error_type).should_reject()
    }

    /// Returns true if the given error type should be corrected.
    pub fn should_correct(&self, error_type: ErrorType) -> bool {
        self.action_for(error_type).should_correct()
    }

    /// Returns true if the given error type should emit a warning.
    pub fn should_warn(&self, error_type: ErrorType) -> bool {
        self.action_for(error_type).should_warn()
    }

    /// Create a cleaner with this configuration.
    pub fn cleaner(&self) -> KaryotypeCleaner {
        KaryotypeCleaner::new(self.clone())
    }
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self::lenient()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_config_default() {
        let config = ErrorConfig::default();
        assert_eq!(config.mode, ErrorMode::Lenient);
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn test_error_config_strict() {
        let config = ErrorConfig::strict();
        for error_type in ErrorType::ALL {
            assert!(config.should_reject(error_type));
            assert!(!config.should_correct(error_type));
        }
    }

    #[test]
    fn test_error_config_lenient() {
        let config = ErrorConfig::lenient();
        assert!(config.should_correct(ErrorType::CommaInParentheses));
        assert!(config.should_warn(ErrorType::CommaInParentheses));
    }

    #[test]
    fn test_error_config_silent() {
        let config = ErrorConfig::silent();
        assert!(config.should_correct(ErrorType::WrongArrow));
        assert!(!config.should_warn(ErrorType::WrongArrow));
    }

    #[test]
    fn test_set_and_remove_override() {
        let mut config = ErrorConfig::lenient();
        config.set_override(ErrorType::TrailingSeparator, ErrorOverride::Reject);
        assert!(config.should_reject(ErrorType::TrailingSeparator));

        config.remove_override(ErrorType::TrailingSeparator);
        assert!(config.should_correct(ErrorType::TrailingSeparator));
    }

    #[test]
    fn test_cleaner_uses_config() {
        let cleaner = ErrorConfig::strict().cleaner();
        assert_eq!(cleaner.config().mode, ErrorMode::Strict);
        assert_eq!(cleaner.clean("46,xx"), None);
        assert_eq!(
            ErrorConfig::lenient().cleaner().clean("46,xx").as_deref(),
            Some("46,XX")
        );
    }
}
