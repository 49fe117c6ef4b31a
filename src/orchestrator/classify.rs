//! Input classification
//!
//! Decides which pipeline a karyotype string is routed to. Classification
//! works on the normalized text: quotes, whitespace and `?` removed.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::extract::extract_detailed;

static STANDARD_EVENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|,)(?:[+\-]|(?:idic|del|dup|inv|ins|add|trp|qdp|der|dic|t|i|r)\()")
        .expect("standard event pattern is valid")
});

/// Pipeline decision for one karyotype string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Standard grammar parser and event interpreter only
    Standard,
    /// Detailed interpreter only, clause by clause
    Detailed,
    /// Detailed clauses extracted, residue through the standard pipeline
    Mixed,
    /// Whole string on the standard pipeline, split into clones on rejection
    Split,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Standard => write!(f, "standard"),
            Route::Detailed => write!(f, "detailed"),
            Route::Mixed => write!(f, "mixed"),
            Route::Split => write!(f, "split"),
        }
    }
}

/// Strip surrounding quotes, all whitespace and `?` uncertainty markers.
///
/// The position of a removed `?` is lost, so the band that followed it is
/// treated as certain.
pub fn normalize_input(input: &str) -> String {
    input
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '?')
        .collect()
}

/// True if the text holds more than one clone (`]` directly followed by `/`).
pub fn is_multi_clone(text: &str) -> bool {
    text.contains("]/")
}

/// True if any `der`/`dic`/`r` clause uses a detailed-system body.
pub fn is_detailed(text: &str) -> bool {
    !extract_detailed(text).clauses.is_empty()
}

/// True if the text holds at least one standard event token.
pub fn has_standard_event(text: &str) -> bool {
    STANDARD_EVENT.is_match(text)
}

/// Classify normalized text.
pub fn classify(text: &str) -> Route {
    let extraction = extract_detailed(text);
    if extraction.clauses.is_empty() {
        Route::Standard
    } else if is_multi_clone(text) {
        Route::Split
    } else if has_standard_event(&extraction.residue) {
        Route::Mixed
    } else {
        Route::Detailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_input() {
        assert_eq!(normalize_input("\"46, XX, del(5)(q13q31)\""), "46,XX,del(5)(q13q31)");
        assert_eq!(normalize_input("46,XY,t(9;22)(q34;q?11)"), "46,XY,t(9;22)(q34;q11)");
        assert_eq!(normalize_input("  '47,XX,+8'  "), "47,XX,+8");
    }

    #[test]
    fn test_multi_clone() {
        assert!(is_multi_clone("46,XX[10]/47,XX,+8[5]"));
        assert!(!is_multi_clone("46,XX/47,XX,+8"));
    }

    #[test]
    fn test_detailed() {
        assert!(is_detailed("46,XX,der(7)(::7q11->7q31::)"));
        assert!(!is_detailed("46,XX,der(9)t(9;17)(q11;q34)"));
        assert!(!is_detailed("46,XX,del(5)(q13q31)"));
    }

    #[test]
    fn test_standard_event_tokens() {
        assert!(has_standard_event("46,XX,+7"));
        assert!(has_standard_event("45,XY,-7"));
        assert!(has_standard_event("i(17q)"));
        assert!(!has_standard_event("46,XX"));
        assert!(!has_standard_event("46,XX[20]"));
    }

    #[test]
    fn test_classify_routes() {
        assert_eq!(classify("46,XX,del(5)(q13q31)"), Route::Standard);
        assert_eq!(classify("46,XX[10]/47,XX,+8[5]"), Route::Standard);
        assert_eq!(
            classify("46,XX,der(13)(13pter->13q10::15q21->15q31::13q14->13qter)"),
            Route::Detailed
        );
        assert_eq!(
            classify("46,XX,+7,der(13)(13pter->13q10::15q21->15q31::13q14->13qter)"),
            Route::Mixed
        );
        assert_eq!(
            classify("46,XX,der(7)(::7q11->7q31::)[10]/46,XX[5]"),
            Route::Split
        );
    }
}
