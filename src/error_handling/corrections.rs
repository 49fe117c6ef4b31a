//! Correction logic for each error type.
//!
//! Each function detects one kind of input mistake in a karyotype string and
//! returns the corrected string together with the corrections made. Offsets
//! refer to the string passed in.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::ErrorType;

static KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(^|[,+\-/)])(idic|del|dup|inv|ins|add|trp|qdp|der|dic|t|i|r)\(")
        .expect("keyword pattern is valid")
});

static EVENT_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[+\-]|(?:idic|del|dup|inv|ins|add|trp|qdp|der|dic|t|i|r)\()")
        .expect("event start pattern is valid")
});

static WRONG_ARROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\u{2192}|-->|=>").expect("arrow pattern is valid"));

static TRAILING_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,.;]+(\[|/|$)").expect("separator pattern is valid"));

/// A detected correction with its details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedCorrection {
    /// The type of error detected.
    pub error_type: ErrorType,
    /// The original text that was corrected.
    pub original: String,
    /// The corrected text.
    pub corrected: String,
    /// Start position (byte offset) in the input.
    pub start: usize,
    /// End position (byte offset) in the input.
    pub end: usize,
}

impl DetectedCorrection {
    /// Create a new detected correction.
    pub fn new(
        error_type: ErrorType,
        original: impl Into<String>,
        corrected: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            error_type,
            original: original.into(),
            corrected: corrected.into(),
            start,
            end,
        }
    }

    /// Format a warning message for this correction.
    pub fn warning_message(&self) -> String {
        format!(
            "{} at position {}: '{}' → '{}'",
            self.error_type, self.start, self.original, self.corrected
        )
    }
}

/// Apply the correction for one error type.
pub fn correct(error_type: ErrorType, input: &str) -> (String, Vec<DetectedCorrection>) {
    match error_type {
        ErrorType::UppercaseKeyword => correct_keyword_case(input),
        ErrorType::LowercaseSexChromosome => correct_sex_chromosome_case(input),
        ErrorType::WrongDashCharacter => correct_dash_characters(input),
        ErrorType::WrongArrow => correct_arrows(input),
        ErrorType::ExtraWhitespace => correct_whitespace(input),
        ErrorType::CommaInParentheses => correct_comma_in_parentheses(input),
        ErrorType::UnbalancedParentheses => correct_unbalanced_parentheses(input),
        ErrorType::TrailingSeparator => correct_trailing_separator(input),
        ErrorType::UnterminatedCellCount => correct_cell_count(input),
    }
}

/// Remove whitespace, which never carries meaning in a karyotype.
pub fn correct_whitespace(input: &str) -> (String, Vec<DetectedCorrection>) {
    let mut result = String::with_capacity(input.len());
    let mut corrections = Vec::new();
    let mut run: Option<usize> = None;

    for (i, c) in input.char_indices() {
        if c.is_whitespace() {
            run.get_or_insert(i);
            continue;
        }
        if let Some(start) = run.take() {
            corrections.push(DetectedCorrection::new(
                ErrorType::ExtraWhitespace,
                &input[start..i],
                "",
                start,
                i,
            ));
        }
        result.push(c);
    }
    if let Some(start) = run {
        corrections.push(DetectedCorrection::new(
            ErrorType::ExtraWhitespace,
            &input[start..],
            "",
            start,
            input.len(),
        ));
    }

    (result, corrections)
}

/// Normalize en-dash, em-dash and minus sign to hyphen.
pub fn correct_dash_characters(input: &str) -> (String, Vec<DetectedCorrection>) {
    let mut result = String::with_capacity(input.len());
    let mut corrections = Vec::new();

    for (i, c) in input.char_indices() {
        match c {
            '\u{2013}' | '\u{2014}' | '\u{2212}' => {
                corrections.push(DetectedCorrection::new(
                    ErrorType::WrongDashCharacter,
                    c.to_string(),
                    "-",
                    i,
                    i + c.len_utf8(),
                ));
                result.push('-');
            }
            _ => result.push(c),
        }
    }

    (result, corrections)
}

/// Normalize `→`, `-->` and `=>` to `->`.
pub fn correct_arrows(input: &str) -> (String, Vec<DetectedCorrection>) {
    let corrections = WRONG_ARROW
        .find_iter(input)
        .map(|m| {
            DetectedCorrection::new(ErrorType::WrongArrow, m.as_str(), "->", m.start(), m.end())
        })
        .collect();
    (WRONG_ARROW.replace_all(input, "->").into_owned(), corrections)
}

/// Lowercase event keywords written in upper or mixed case.
pub fn correct_keyword_case(input: &str) -> (String, Vec<DetectedCorrection>) {
    let mut result = String::with_capacity(input.len());
    let mut corrections = Vec::new();
    let mut last = 0;

    for caps in KEYWORD.captures_iter(input) {
        let Some(keyword) = caps.get(2) else {
            continue;
        };
        let lower = keyword.as_str().to_ascii_lowercase();
        if lower == keyword.as_str() {
            continue;
        }
        result.push_str(&input[last..keyword.start()]);
        result.push_str(&lower);
        last = keyword.end();
        corrections.push(DetectedCorrection::new(
            ErrorType::UppercaseKeyword,
            keyword.as_str(),
            lower,
            keyword.start(),
            keyword.end(),
        ));
    }
    result.push_str(&input[last..]);

    (result, corrections)
}

/// Uppercase the sex chromosome field of each clone.
pub fn correct_sex_chromosome_case(input: &str) -> (String, Vec<DetectedCorrection>) {
    let mut result = input.to_string();
    let mut corrections = Vec::new();
    let mut clone_start = 0;

    for clone in input.split('/') {
        if let Some(comma) = clone.find(',') {
            let field_start = comma + 1;
            let field_end = clone[field_start..]
                .find([',', '['])
                .map_or(clone.len(), |i| field_start + i);
            let field = &clone[field_start..field_end];
            let is_sex = !field.is_empty()
                && field.chars().all(|c| matches!(c, 'x' | 'X' | 'y' | 'Y'));
            if is_sex && field.chars().any(|c| c.is_ascii_lowercase()) {
                let start = clone_start + field_start;
                let upper = field.to_ascii_uppercase();
                result.replace_range(start..start + field.len(), &upper);
                corrections.push(DetectedCorrection::new(
                    ErrorType::LowercaseSexChromosome,
                    field,
                    upper,
                    start,
                    start + field.len(),
                ));
            }
        }
        clone_start += clone.len() + 1;
    }

    (result, corrections)
}

/// Replace commas inside parentheses with semicolons.
pub fn correct_comma_in_parentheses(input: &str) -> (String, Vec<DetectedCorrection>) {
    let mut result = String::with_capacity(input.len());
    let mut corrections = Vec::new();
    let mut depth = 0usize;

    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth > 0 => {
                corrections.push(DetectedCorrection::new(
                    ErrorType::CommaInParentheses,
                    ",",
                    ";",
                    i,
                    i + 1,
                ));
                result.push(';');
                continue;
            }
            _ => {}
        }
        result.push(c);
    }

    (result, corrections)
}

/// Close parentheses left open at the end of an event.
///
/// An event ends at a cell count, a clone separator, the end of input, or a
/// comma followed by the start of another event.
pub fn correct_unbalanced_parentheses(input: &str) -> (String, Vec<DetectedCorrection>) {
    let mut result = String::with_capacity(input.len() + 2);
    let mut corrections = Vec::new();
    let mut depth = 0usize;

    for (i, c) in input.char_indices() {
        let closes_event = match c {
            '[' | '/' => true,
            ',' => {
                let rest = &input[i + 1..];
                rest.is_empty() || EVENT_START.is_match(rest)
            }
            _ => false,
        };
        if closes_event && depth > 0 {
            let closers = ")".repeat(depth);
            corrections.push(DetectedCorrection::new(
                ErrorType::UnbalancedParentheses,
                "",
                closers.clone(),
                i,
                i,
            ));
            result.push_str(&closers);
            depth = 0;
        }
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        result.push(c);
    }
    if depth > 0 {
        let closers = ")".repeat(depth);
        corrections.push(DetectedCorrection::new(
            ErrorType::UnbalancedParentheses,
            "",
            closers.clone(),
            input.len(),
            input.len(),
        ));
        result.push_str(&closers);
    }

    (result, corrections)
}

/// Remove separators left before a cell count, a clone separator or the end.
pub fn correct_trailing_separator(input: &str) -> (String, Vec<DetectedCorrection>) {
    let corrections = TRAILING_SEPARATOR
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let kept = caps.get(1).map_or("", |m| m.as_str());
            let removed = &whole.as_str()[..whole.len() - kept.len()];
            Some(DetectedCorrection::new(
                ErrorType::TrailingSeparator,
                removed,
                "",
                whole.start(),
                whole.start() + removed.len(),
            ))
        })
        .collect();
    (
        TRAILING_SEPARATOR.replace_all(input, "$1").into_owned(),
        corrections,
    )
}

/// Close cell counts missing their `]`.
pub fn correct_cell_count(input: &str) -> (String, Vec<DetectedCorrection>) {
    let mut result = String::with_capacity(input.len() + 1);
    let mut corrections = Vec::new();
    let mut open = false;

    for (i, c) in input.char_indices() {
        match c {
            '[' => open = true,
            ']' => open = false,
            '/' if open => {
                corrections.push(DetectedCorrection::new(
                    ErrorType::UnterminatedCellCount,
                    "",
                    "]",
                    i,
                    i,
                ));
                result.push(']');
                open = false;
            }
            _ => {}
        }
        result.push(c);
    }
    if open {
        corrections.push(DetectedCorrection::new(
            ErrorType::UnterminatedCellCount,
            "",
            "]",
            input.len(),
            input.len(),
        ));
        result.push(']');
    }

    (result, corrections)
}
