//! Karyotype orchestration
//!
//! [`KaryotypeInterpreter`] classifies a karyotype string, routes it to the
//! standard pipeline, the detailed interpreter or both, and merges the
//! results into one [`KaryotypeReport`].
//!
//! | multi-clone | detailed | residue has events | route |
//! |---|---|---|---|
//! | any | no | - | standard pipeline |
//! | no | yes | no | detailed interpreter, clause by clause |
//! | no | yes | yes | clauses extracted, residue through the standard pipeline, merged |
//! | yes | yes | - | whole string on standard; if rejected, split on `]/` and route each |
//!
//! When the grammar rejects text, the rejection becomes an
//! [`IscnError::Syntax`] carrying positional token errors. The cleaner is
//! asked once for a rewrite of the whole normalized string; a rewrite that
//! every pipeline it routes to accepts is attached as the failure's
//! suggestion and is never interpreted.
//!
//! # Example
//!
//! ```
//! use ferro_iscn::bands::band_index;
//! use ferro_iscn::orchestrator::{KaryotypeInterpreter, Pipeline};
//!
//! let interpreter = KaryotypeInterpreter::new();
//! let report = interpreter
//!     .interpret("46,XX,+7,der(13)(13pter->13q10::15q21->15q31::13q14->13qter)")
//!     .unwrap();
//! assert_eq!(report.clones[0].pipeline, Pipeline::Mixed);
//!
//! let outcome = report.clones[0].outcome.as_ref().unwrap();
//! let band = band_index().resolve("15q22.1").unwrap();
//! assert_eq!(outcome.gain_at(band), 1);
//! ```

pub mod classify;
pub mod extract;
mod report;

pub use classify::{classify, normalize_input, Route};
pub use extract::{extract_detailed, Extraction};
pub use report::{CloneReport, KaryotypeReport, Pipeline};

use log::{debug, trace, warn};

use crate::bands::band_index;
use crate::config::IscnConfig;
use crate::detailed::{DetailedFormula, DetailedInterpreter};
use crate::error::{ErrorCode, IscnError, SourceSpan, SyntaxFailure, TokenError};
use crate::error_handling::{Cleaner, KaryotypeCleaner};
use crate::outcome::BiologicalOutcome;
use crate::standard::parser::split_top_level;
use crate::standard::{
    CloneRelationship, EventInterpreter, IscnParser, RowClones, StandardEventInterpreter,
    StandardParser, SyntaxRejection,
};
use crate::Result;
use extract::{split_cell_count, split_clones};

/// Interprets karyotype strings into per-clone outcomes.
#[derive(Debug, Clone)]
pub struct KaryotypeInterpreter<
    P = IscnParser,
    I = StandardEventInterpreter<'static>,
    C = KaryotypeCleaner,
> {
    parser: P,
    events: I,
    cleaner: C,
    detailed: DetailedInterpreter<'static>,
    suggest_corrections: bool,
}

impl KaryotypeInterpreter {
    /// Interpreter with the built-in parser, event interpreter and a lenient
    /// cleaner.
    pub fn new() -> Self {
        Self::with_components(
            IscnParser::new(),
            StandardEventInterpreter::default(),
            KaryotypeCleaner::default(),
        )
    }

    /// Interpreter wired from a configuration file.
    pub fn from_config(config: &IscnConfig) -> Result<Self> {
        let cleaner = config.to_error_config()?.cleaner();
        Ok(Self::with_components(
            IscnParser::new(),
            StandardEventInterpreter::default(),
            cleaner,
        )
        .with_suggestions(config.interpretation.suggest_corrections)
        .with_breakpoint_clamping(config.interpretation.clamp_out_of_range_breakpoints))
    }
}

impl Default for KaryotypeInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, I, C> KaryotypeInterpreter<P, I, C>
where
    P: StandardParser,
    I: EventInterpreter,
    C: Cleaner,
{
    /// Interpreter over custom collaborators.
    pub fn with_components(parser: P, events: I, cleaner: C) -> Self {
        Self {
            parser,
            events,
            cleaner,
            detailed: DetailedInterpreter::new(band_index()),
            suggest_corrections: true,
        }
    }

    /// Offer cleaned rewrites on syntax failures (on by default).
    pub fn with_suggestions(mut self, suggest: bool) -> Self {
        self.suggest_corrections = suggest;
        self
    }

    /// Clamp out-of-range breakpoints in detailed formulas (on by default).
    pub fn with_breakpoint_clamping(mut self, clamp: bool) -> Self {
        self.detailed = self.detailed.with_breakpoint_clamping(clamp);
        self
    }

    /// Interpret one karyotype string.
    pub fn interpret(&self, input: &str) -> Result<KaryotypeReport> {
        let normalized = normalize_input(input);
        let clones = match self.route(&normalized) {
            Err(IscnError::Syntax(mut failure)) => {
                if self.suggest_corrections {
                    failure.suggestion = self.suggestion(&normalized);
                }
                return Err(IscnError::Syntax(failure));
            }
            other => other?,
        };
        Ok(KaryotypeReport {
            input: input.to_string(),
            normalized,
            clones,
        })
    }

    fn route(&self, text: &str) -> Result<Vec<CloneReport>> {
        let route = classify(text);
        debug!("routing '{}' to the {} pipeline", text, route);

        match route {
            Route::Standard => self.standard(text),
            Route::Detailed => {
                let extraction = extract_detailed(text);
                let (code, cell_count) = split_cell_count(text);
                Ok(vec![CloneReport {
                    code: code.to_string(),
                    cell_count,
                    relationship: CloneRelationship::Independent,
                    pipeline: Pipeline::Detailed,
                    outcome: self.detailed_outcome(&extraction.clauses),
                }])
            }
            Route::Mixed => self.mixed(text),
            Route::Split => match self.parser.parse(text) {
                Ok(clones) => self.standard_reports(clones),
                Err(rejection) => {
                    debug!("whole-string parse failed ({}), splitting clones", rejection);
                    self.split(text)
                }
            },
        }
    }

    fn split(&self, text: &str) -> Result<Vec<CloneReport>> {
        let mut reports = Vec::new();
        for (clone, cell_count) in split_clones(text) {
            for mut report in self.route(clone)? {
                report.cell_count = report.cell_count.or(cell_count);
                reports.push(report);
            }
        }
        Ok(reports)
    }

    fn mixed(&self, text: &str) -> Result<Vec<CloneReport>> {
        let segments = extract_segments(text);
        let residue = joined_residue(&segments);
        trace!(
            "mixed karyotype: residue '{}', {} clone segment(s)",
            residue,
            segments.len()
        );

        let mut reports = self.standard(&residue)?;

        if reports.len() != segments.len() {
            debug!(
                "{} clone(s) from {} segment(s), crediting clauses to the first clone",
                reports.len(),
                segments.len()
            );
            let clauses: Vec<String> =
                segments.into_iter().flat_map(|(_, e)| e.clauses).collect();
            let detailed = self.detailed_outcome(&clauses);
            let (code, cell_count) = split_cell_count(text);
            match reports.first_mut() {
                Some(first) => {
                    first.outcome = BiologicalOutcome::merge(first.outcome.take(), detailed);
                    first.pipeline = Pipeline::Mixed;
                }
                None => reports.push(CloneReport {
                    code: code.to_string(),
                    cell_count,
                    relationship: CloneRelationship::Independent,
                    pipeline: Pipeline::Mixed,
                    outcome: detailed,
                }),
            }
            return Ok(reports);
        }

        for (report, (segment, extraction)) in reports.iter_mut().zip(&segments) {
            if extraction.clauses.is_empty() {
                continue;
            }
            let detailed = self.detailed_outcome(&extraction.clauses);
            report.outcome = BiologicalOutcome::merge(report.outcome.take(), detailed);
            report.pipeline = Pipeline::Mixed;
            report.code = split_cell_count(segment).0.to_string();
        }
        Ok(reports)
    }

    fn standard(&self, text: &str) -> Result<Vec<CloneReport>> {
        match self.parser.parse(text) {
            Ok(clones) => self.standard_reports(clones),
            Err(rejection) => Err(self.syntax_failure(text, rejection)),
        }
    }

    fn standard_reports(&self, mut clones: RowClones) -> Result<Vec<CloneReport>> {
        self.events.process_missing_breakpoints(&mut clones);
        self.events.mark_uncertain_der_event(&mut clones);

        clones
            .iter()
            .map(|clone| {
                Ok(CloneReport {
                    code: clone.code.clone(),
                    cell_count: clone.cell_count,
                    relationship: clone.relationship,
                    pipeline: Pipeline::Standard,
                    outcome: Some(self.events.karyotype_outcome(clone)?),
                })
            })
            .collect()
    }

    fn detailed_outcome(&self, clauses: &[String]) -> Option<BiologicalOutcome> {
        clauses
            .iter()
            .map(|clause| Some(self.detailed.interpret_clause(clause)))
            .fold(None, BiologicalOutcome::merge)
    }

    fn syntax_failure(&self, text: &str, rejection: SyntaxRejection) -> IscnError {
        warn!("grammar rejected '{}': {}", text, rejection);

        let mut errors = self.parser.token_errors(text);
        if errors.is_empty() {
            errors.push(rejection_error(text, &rejection));
        }

        IscnError::Syntax(SyntaxFailure::new(text, errors))
    }

    fn suggestion(&self, text: &str) -> Option<String> {
        let rewrite = self.cleaner.clean(text)?;
        if self.accepts(&rewrite) {
            warn!("did you mean '{}'?", rewrite);
            Some(rewrite)
        } else {
            debug!("cleaned rewrite '{}' still rejected", rewrite);
            None
        }
    }

    /// True if every pipeline the text routes to would accept it.
    fn accepts(&self, text: &str) -> bool {
        match classify(text) {
            Route::Standard => self.parser.parse(text).is_ok(),
            Route::Detailed => clauses_parse(&extract_detailed(text).clauses),
            Route::Mixed => {
                let segments = extract_segments(text);
                segments.iter().all(|(_, e)| clauses_parse(&e.clauses))
                    && self.parser.parse(&joined_residue(&segments)).is_ok()
            }
            Route::Split => {
                self.parser.parse(text).is_ok()
                    || split_clones(text).iter().all(|(clone, _)| self.accepts(clone))
            }
        }
    }
}

/// Extract detailed clauses clone by clone.
fn extract_segments(text: &str) -> Vec<(&str, Extraction)> {
    split_top_level(text, '/')
        .into_iter()
        .map(|segment| (segment, extract_detailed(segment)))
        .collect()
}

fn joined_residue(segments: &[(&str, Extraction)]) -> String {
    segments
        .iter()
        .map(|(_, e)| e.residue.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

fn clauses_parse(clauses: &[String]) -> bool {
    clauses
        .iter()
        .all(|c| DetailedFormula::parse(c.trim_start_matches(['+', '-'])).is_some())
}

/// Token error for a rejection the permissive scan could not place.
fn rejection_error(text: &str, rejection: &SyntaxRejection) -> TokenError {
    match text.get(rejection.position..).and_then(|rest| rest.chars().next()) {
        Some(c) => TokenError::new(
            ErrorCode::UnexpectedChar,
            SourceSpan::new(rejection.position, rejection.position + c.len_utf8()),
            c.to_string(),
            rejection.message.clone(),
        ),
        None => TokenError::new(
            ErrorCode::UnexpectedEnd,
            SourceSpan::point(text.len()),
            "",
            rejection.message.clone(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ErrorConfig;

    fn index_of(band: &str) -> usize {
        band_index().resolve(band).unwrap()
    }

    #[test]
    fn test_standard_route() {
        let report = KaryotypeInterpreter::new()
            .interpret("46,XX,del(5)(q13q31)[20]")
            .unwrap();
        assert_eq!(report.len(), 1);
        let clone = &report.clones[0];
        assert_eq!(clone.pipeline, Pipeline::Standard);
        assert_eq!(clone.cell_count, Some(20));
        assert_eq!(clone.outcome.as_ref().unwrap().loss_at(index_of("5q21.1")), 1);
    }

    #[test]
    fn test_detailed_route() {
        let report = KaryotypeInterpreter::new()
            .interpret("46,XX,der(7)(::7q11->7q31::)[8]")
            .unwrap();
        let clone = &report.clones[0];
        assert_eq!(clone.pipeline, Pipeline::Detailed);
        assert_eq!(clone.code, "46,XX,der(7)(::7q11->7q31::)");
        assert_eq!(clone.cell_count, Some(8));
        let outcome = clone.outcome.as_ref().unwrap();
        assert_eq!(outcome.loss_at(index_of("7q36.3")), 1);
        assert_eq!(outcome.detailed_system.len(), 1);
    }

    #[test]
    fn test_input_normalized() {
        let report = KaryotypeInterpreter::new()
            .interpret("\"46, XX, del(5)(q?13q31)\"")
            .unwrap();
        assert_eq!(report.normalized, "46,XX,del(5)(q13q31)");
    }

    #[test]
    fn test_split_route() {
        let report = KaryotypeInterpreter::new()
            .interpret("46,XX,der(7)(::7q11->7q31::)[10]/47,XX,+8[5]")
            .unwrap();
        assert_eq!(report.clone_codes(), vec!["46,XX,der(7)(::7q11->7q31::)", "47,XX,+8"]);
        assert_eq!(report.cell_counts(), vec![Some(10), Some(5)]);
        assert_eq!(
            report.relationships(),
            vec![CloneRelationship::Independent, CloneRelationship::Independent]
        );
        let pipelines: Vec<_> = report.clones.iter().map(|c| c.pipeline).collect();
        assert_eq!(pipelines, vec![Pipeline::Detailed, Pipeline::Standard]);
    }

    #[test]
    fn test_syntax_failure_with_suggestion() {
        let err = KaryotypeInterpreter::new()
            .interpret("46,xx,del(5)(q13q31)")
            .unwrap_err();
        assert!(err.is_syntax());
        let failure = err.syntax_failure().unwrap();
        assert!(!failure.errors.is_empty());
        assert_eq!(failure.suggestion.as_deref(), Some("46,XX,del(5)(q13q31)"));
    }

    #[test]
    fn test_strict_cleaner_gives_no_suggestion() {
        let interpreter = KaryotypeInterpreter::with_components(
            IscnParser::new(),
            StandardEventInterpreter::default(),
            ErrorConfig::strict().cleaner(),
        );
        let err = interpreter.interpret("46,xx,del(5)(q13q31)").unwrap_err();
        assert_eq!(err.syntax_failure().unwrap().suggestion, None);
    }

    #[test]
    fn test_suggestions_disabled() {
        let err = KaryotypeInterpreter::new()
            .with_suggestions(false)
            .interpret("46,xx")
            .unwrap_err();
        assert_eq!(err.syntax_failure().unwrap().suggestion, None);
    }

    #[test]
    fn test_rejection_error_fallback() {
        let error = rejection_error("46,XX,", &SyntaxRejection::new(6, "unexpected end"));
        assert_eq!(error.code, ErrorCode::UnexpectedEnd);
        let error = rejection_error("46,XX,q", &SyntaxRejection::new(6, "unexpected 'q'"));
        assert_eq!(error.token, "q");
        assert_eq!(error.span, SourceSpan::new(6, 7));
    }

    #[test]
    fn test_from_config() {
        let config = IscnConfig::parse("[interpretation]\nsuggest-corrections = false\n").unwrap();
        let interpreter = KaryotypeInterpreter::from_config(&config).unwrap();
        let err = interpreter.interpret("46,xx").unwrap_err();
        assert_eq!(err.syntax_failure().unwrap().suggestion, None);
    }

    #[test]
    fn test_mixed_clauses_credit_their_own_clone() {
        let report = KaryotypeInterpreter::new()
            .interpret("46,XX/47,XX,+8,der(7)(::7q11->7q31::)")
            .unwrap();
        assert_eq!(report.clone_codes(), vec!["46,XX", "47,XX,+8,der(7)(::7q11->7q31::)"]);
        let pipelines: Vec<_> = report.clones.iter().map(|c| c.pipeline).collect();
        assert_eq!(pipelines, vec![Pipeline::Standard, Pipeline::Mixed]);

        let first = report.clones[0].outcome.as_ref().unwrap();
        assert_eq!(first.loss_at(index_of("7q36.3")), 0);
        assert!(first.detailed_system.is_empty());

        let second = report.clones[1].outcome.as_ref().unwrap();
        assert_eq!(second.loss_at(index_of("7q36.3")), 1);
        assert_eq!(second.gain_at(index_of("8q24.3")), 1);
    }

    #[test]
    fn test_supernumerary_derivative_has_no_losses() {
        let report = KaryotypeInterpreter::new()
            .interpret("47,XX,+der(7)(7pter->7q22::9q34->9qter)")
            .unwrap();
        let outcome = report.clones[0].outcome.as_ref().unwrap();
        assert!(outcome.lost().is_empty());
        assert_eq!(outcome.gain_at(index_of("7q22.1")), 1);
        assert_eq!(outcome.gain_at(index_of("9q34.3")), 1);
    }

    #[test]
    fn test_suggestion_repairs_detailed_arrow() {
        let err = KaryotypeInterpreter::new()
            .interpret("46,XX,der(7)(7pter=>7q22)")
            .unwrap_err();
        let failure = err.syntax_failure().unwrap();
        assert_eq!(failure.suggestion.as_deref(), Some("46,XX,der(7)(7pter->7q22)"));
    }

    #[test]
    fn test_mixed_suggestion_keeps_detailed_clause() {
        let err = KaryotypeInterpreter::new()
            .interpret("46,xx,+7,der(7)(::7q11->7q31::)")
            .unwrap_err();
        let failure = err.syntax_failure().unwrap();
        assert_eq!(failure.input, "46,xx,+7");
        assert_eq!(
            failure.suggestion.as_deref(),
            Some("46,XX,+7,der(7)(::7q11->7q31::)")
        );
    }
}
