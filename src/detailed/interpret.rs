//! Loss/gain/fusion interpretation of detailed-system formulas
//!
//! Segments whose chromosome is one of the base chromosomes are *native*:
//! they carry retained material and take part in gap analysis. All other
//! segments are *foreign* and credit a gain over their whole extent. Every
//! resolved, non-telomeric segment endpoint and standalone breakpoint is a
//! fusion point.
//!
//! A `+` before the clause (`+der(7)(...)`) adds the derivative to an
//! otherwise intact complement: every segment is gained and nothing is lost.

use log::trace;
use std::borrow::Cow;
use std::cmp::Ordering;

use super::formula::{DetailedFormula, Element, Segment};
use crate::bands::{
    band_index, is_pter, is_qter, is_telomere, telomere_band, Arm, Band, BandIndex,
};
use crate::outcome::BiologicalOutcome;

/// Interpreter for detailed-system clauses
#[derive(Debug, Clone, Copy)]
pub struct DetailedInterpreter<'a> {
    index: &'a BandIndex,
    clamp_breakpoints: bool,
}

impl Default for DetailedInterpreter<'static> {
    fn default() -> Self {
        Self::new(band_index())
    }
}

impl<'a> DetailedInterpreter<'a> {
    /// Create an interpreter over a band index.
    pub fn new(index: &'a BandIndex) -> Self {
        Self {
            index,
            clamp_breakpoints: true,
        }
    }

    /// Treat unresolvable breakpoints past the end of their arm as that
    /// arm's telomere (on by default).
    pub fn with_breakpoint_clamping(mut self, clamp: bool) -> Self {
        self.clamp_breakpoints = clamp;
        self
    }

    /// Interpret one clause string, optionally signed.
    ///
    /// A clause that does not parse yields a zero-valued outcome. A `-`
    /// clause is recorded as an uncertain event.
    pub fn interpret_clause(&self, clause: &str) -> BiologicalOutcome {
        let clause = clause.trim();
        let (sign, body) = match clause.strip_prefix(['+', '-']) {
            Some(body) => (clause.chars().next(), body),
            None => (None, clause),
        };
        let Some(formula) = DetailedFormula::parse(body) else {
            trace!("clause '{}' is not a detailed formula", clause);
            return BiologicalOutcome::for_index(self.index);
        };

        match sign {
            Some('+') => self.interpret_supernumerary(&formula),
            Some(_) => {
                let mut outcome = BiologicalOutcome::for_index(self.index);
                outcome.note_uncertain(format!("loss of derivative '{}' not quantified", clause));
                outcome
            }
            None => self.interpret(&formula),
        }
    }

    /// Interpret a parsed formula.
    pub fn interpret(&self, formula: &DetailedFormula) -> BiologicalOutcome {
        let mut outcome = BiologicalOutcome::for_index(self.index);
        self.credit_segments(&mut outcome, formula, false);

        for chromosome in &formula.base_chromosomes {
            self.credit_losses(&mut outcome, formula, chromosome);
        }

        outcome.detailed_system.push(formula.to_string());
        outcome
    }

    /// Interpret a formula present in addition to the normal homologs.
    ///
    /// Native segments gain the bands they span, counted from the
    /// p-telomere for `pter` segments; no gap analysis runs.
    pub fn interpret_supernumerary(&self, formula: &DetailedFormula) -> BiologicalOutcome {
        let mut outcome = BiologicalOutcome::for_index(self.index);
        self.credit_segments(&mut outcome, formula, true);
        outcome.detailed_system.push(format!("+{}", formula));
        outcome
    }

    fn credit_segments(
        &self,
        outcome: &mut BiologicalOutcome,
        formula: &DetailedFormula,
        gain_native: bool,
    ) {
        for element in &formula.elements {
            match element {
                Element::Segment(segment) => {
                    self.mark_fusion(outcome, &segment.start);
                    self.mark_fusion(outcome, &segment.end);
                    let start = self.effective(&segment.start);
                    let end = self.effective(&segment.end);
                    match segment.chromosome().filter(|c| formula.is_base(c)) {
                        Some(chromosome) if gain_native => {
                            outcome.add_gain(self.native_content(&chromosome, &start, &end), 1);
                        }
                        Some(_) => {}
                        None => outcome.add_gain(self.index.bands_between(&start, &end), 1),
                    }
                }
                Element::Breakpoint(band) => self.mark_fusion(outcome, band),
                Element::Hsr => {}
                Element::Malformed(raw) => trace!("ignoring malformed segment '{}'", raw),
            }
        }
    }

    fn native_content(&self, chromosome: &str, start: &str, end: &str) -> Vec<&'a Band> {
        if is_pter(start) {
            self.index.bands_from_pter(chromosome, end)
        } else if is_pter(end) {
            self.index.bands_from_pter(chromosome, start)
        } else {
            self.index.bands_between(start, end)
        }
    }

    fn credit_losses(
        &self,
        outcome: &mut BiologicalOutcome,
        formula: &DetailedFormula,
        chromosome: &str,
    ) {
        let mut native: Vec<&Segment> = formula
            .segments()
            .filter(|s| s.chromosome().as_deref() == Some(chromosome))
            .collect();

        if native.is_empty() {
            outcome.add_loss(self.index.bands_of_arm(chromosome, Arm::P), 1);
            outcome.add_loss(self.index.bands_of_arm(chromosome, Arm::Q), 1);
            return;
        }

        native.sort_by(|a, b| self.genomic_order(&a.start, &b.start));

        let (Some(first), Some(last)) = (native.first(), native.last()) else {
            return;
        };

        let first_start = self.effective(&first.start);
        if !is_pter(&first_start) {
            outcome.add_loss(self.index.bands_from_pter(chromosome, &first_start), 1);
        }

        for pair in native.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            if current.end != next.start {
                let from = self.effective(&current.end);
                let to = self.effective(&next.start);
                outcome.add_loss(self.index.bands_between(&from, &to), 1);
            }
        }

        let last_end = self.effective(&last.end);
        if !is_qter(&last_end) {
            let qter = telomere_band(chromosome, Arm::Q);
            outcome.add_loss(self.index.bands_between(&last_end, &qter), 1);
        }
    }

    fn mark_fusion(&self, outcome: &mut BiologicalOutcome, breakpoint: &str) {
        if is_telomere(breakpoint) || breakpoint.eq_ignore_ascii_case("hsr") {
            return;
        }
        if let Some(i) = self.index.resolve(breakpoint) {
            outcome.add_fusion(i);
        }
    }

    fn effective<'b>(&self, breakpoint: &'b str) -> Cow<'b, str> {
        if self.clamp_breakpoints {
            if let Some(telomere) = self.index.telomere_beyond(breakpoint) {
                return Cow::Owned(telomere);
            }
        }
        Cow::Borrowed(breakpoint)
    }

    fn genomic_order(&self, a: &str, b: &str) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    fn sort_key(&self, breakpoint: &str) -> SortKey {
        let breakpoint = self.effective(breakpoint);
        if is_pter(&breakpoint) {
            SortKey::Pter
        } else if is_qter(&breakpoint) {
            SortKey::Qter
        } else {
            match self.index.resolve(&breakpoint) {
                Some(i) => SortKey::Band(i),
                None => SortKey::Unresolved(breakpoint.into_owned()),
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Pter,
    Band(usize),
    Unresolved(String),
    Qter,
}
