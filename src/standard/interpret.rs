//! Loss/gain/fusion interpretation of standard events
//!
//! Rearrangements that leave one abnormal chromosome behind (`i`, `idic`,
//! `dic`, `r`, `der`) are computed as the chromosome's band content minus
//! the normal chromosomes it replaces. A `+` prefix means nothing is
//! replaced, so the whole content is gained.

use log::trace;

use super::hooks::{mark_uncertain_der_event, process_missing_breakpoints};
use super::{CloneRecord, Event, EventInterpreter, EventKind, RowClones, Sign};
use crate::bands::{band_index, is_telomere, Band, BandIndex};
use crate::error::{ErrorCode, IscnError};
use crate::outcome::BiologicalOutcome;
use crate::Result;

/// Built-in interpreter for standard events
#[derive(Debug, Clone, Copy)]
pub struct StandardEventInterpreter<'a> {
    index: &'a BandIndex,
}

impl Default for StandardEventInterpreter<'static> {
    fn default() -> Self {
        Self::new(band_index())
    }
}

impl<'a> StandardEventInterpreter<'a> {
    /// Create an interpreter over a band index.
    pub fn new(index: &'a BandIndex) -> Self {
        Self { index }
    }

    /// Outcome of a single event.
    pub fn event_outcome(&self, event: &Event) -> Result<BiologicalOutcome> {
        let mut outcome = BiologicalOutcome::for_index(self.index);
        self.apply(&mut outcome, event)?;
        Ok(outcome)
    }

    fn apply(&self, outcome: &mut BiologicalOutcome, event: &Event) -> Result<()> {
        self.validate(event)?;
        if event.uncertain {
            outcome.note_uncertain(format!("{}: breakpoints cannot be quantified", event.text));
            return Ok(());
        }
        trace!("interpreting standard event '{}'", event.text);

        match event.kind {
            EventKind::Numerical => {
                if let Some(chrom) = event.chromosome() {
                    let bands = self.index.whole_chromosome(chrom);
                    match event.sign {
                        Some(Sign::Minus) => outcome.add_loss(bands, event.copies),
                        _ => outcome.add_gain(bands, event.copies),
                    }
                }
            }
            EventKind::Marker => {
                outcome.note_uncertain(format!(
                    "{}: marker chromosome of unknown origin",
                    event.text
                ));
            }
            EventKind::Deletion => {
                let (chrom, group) = self.first_group(event);
                match group {
                    [bp] => outcome.add_loss(self.index.distal_bands(chrom, bp), 1),
                    [start, end] => outcome.add_loss(self.index.bands_between(start, end), 1),
                    _ => {}
                }
            }
            EventKind::Duplication => self.amplify(outcome, event, 1),
            EventKind::Triplication => self.amplify(outcome, event, 2),
            EventKind::Quadruplication => self.amplify(outcome, event, 3),
            EventKind::Inversion | EventKind::Translocation | EventKind::Insertion => {
                for bp in event.breakpoints.iter().flatten() {
                    self.mark_fusion(outcome, bp);
                }
            }
            EventKind::Addition => {
                let (chrom, group) = self.first_group(event);
                if let [bp] = group {
                    outcome.add_loss(self.index.distal_bands(chrom, bp), 1);
                }
                outcome.note_uncertain(format!(
                    "{}: additional material of unknown origin",
                    event.text
                ));
            }
            EventKind::Isochromosome
            | EventKind::Isodicentric
            | EventKind::Dicentric
            | EventKind::Ring
            | EventKind::Derivative => self.abnormal_chromosome(outcome, event),
        }
        Ok(())
    }

    fn amplify(&self, outcome: &mut BiologicalOutcome, event: &Event, copies: u32) {
        let (_, group) = self.first_group(event);
        match group {
            [bp] => outcome.add_gain(self.index.resolve_band(bp), copies),
            [start, end] => outcome.add_gain(self.index.bands_between(start, end), copies),
            _ => {}
        }
    }

    fn abnormal_chromosome(&self, outcome: &mut BiologicalOutcome, event: &Event) {
        let mut content = Content::new(self.index.len());
        let mut fusions: Vec<&str> = Vec::new();

        match event.kind {
            EventKind::Isochromosome => {
                let (chrom, group) = self.first_group(event);
                if let [bp] = group {
                    let arm = self.index.distal_bands(chrom, bp);
                    content.add(&arm, 2);
                    fusions.push(bp);
                }
            }
            EventKind::Isodicentric => {
                let (chrom, group) = self.first_group(event);
                if let [bp] = group {
                    let lost = self.index.distal_bands(chrom, bp);
                    content.add(&self.index.whole_chromosome(chrom), 2);
                    content.add(&lost, -2);
                    fusions.push(bp);
                }
            }
            EventKind::Dicentric | EventKind::Ring => {
                for (i, chrom) in event.chromosomes.iter().enumerate() {
                    content.add(&self.index.whole_chromosome(chrom), 1);
                    for bp in event.breakpoints.get(i).into_iter().flatten() {
                        content.add(&self.index.distal_bands(chrom, bp), -1);
                        fusions.push(bp);
                    }
                }
            }
            EventKind::Derivative => self.derivative_content(event, &mut content, &mut fusions),
            _ => {}
        }

        if event.sign != Some(Sign::Plus) {
            // der(9)t(...) replaces only its base chromosome
            let replaced = if event.kind == EventKind::Derivative && !event.has_breakpoints() {
                &event.chromosomes[..event.chromosomes.len().min(1)]
            } else {
                &event.chromosomes[..]
            };
            for chrom in replaced {
                content.add(&self.index.whole_chromosome(chrom), -1);
            }
        }

        content.credit(outcome, self.index);
        for bp in fusions {
            self.mark_fusion(outcome, bp);
        }
    }

    fn derivative_content<'e>(
        &self,
        event: &'e Event,
        content: &mut Content,
        fusions: &mut Vec<&'e str>,
    ) {
        // der(1;7)(q10;p10): the arms named by each breakpoint
        if event.has_breakpoints() {
            for (chrom, group) in event.chromosomes.iter().zip(&event.breakpoints) {
                for bp in group {
                    content.add(&self.index.distal_bands(chrom, bp), 1);
                    fusions.push(bp);
                }
            }
            return;
        }

        let Some(base) = event.chromosome() else {
            return;
        };
        content.add(&self.index.whole_chromosome(base), 1);

        for nested in &event.nested {
            let position = nested.chromosomes.iter().position(|c| c == base);
            match (nested.kind, position) {
                (EventKind::Translocation, Some(k)) => {
                    let n = nested.chromosomes.len();
                    let donor = (k + n - 1) % n;
                    if let Some(bp) = nested.breakpoints.get(k).and_then(|g| g.first()) {
                        content.add(&self.index.distal_bands(base, bp), -1);
                        fusions.push(bp);
                    }
                    if let (Some(chrom), Some(bp)) = (
                        nested.chromosomes.get(donor),
                        nested.breakpoints.get(donor).and_then(|g| g.first()),
                    ) {
                        content.add(&self.index.distal_bands(chrom, bp), 1);
                        fusions.push(bp);
                    }
                }
                (EventKind::Deletion, Some(_)) => {
                    match nested.breakpoints.first().map(Vec::as_slice) {
                        Some([bp]) => content.add(&self.index.distal_bands(base, bp), -1),
                        Some([start, end]) => {
                            content.add(&self.index.bands_between(start, end), -1)
                        }
                        _ => {}
                    }
                }
                (EventKind::Duplication, Some(_)) => {
                    if let Some([start, end]) = nested.breakpoints.first().map(Vec::as_slice) {
                        content.add(&self.index.bands_between(start, end), 1);
                    }
                }
                _ => {
                    for bp in nested.breakpoints.iter().flatten() {
                        fusions.push(bp);
                    }
                }
            }
        }
    }

    fn first_group<'e>(&self, event: &'e Event) -> (&'e str, &'e [String]) {
        (
            event.chromosome().unwrap_or_default(),
            event.breakpoints.first().map(Vec::as_slice).unwrap_or_default(),
        )
    }

    fn mark_fusion(&self, outcome: &mut BiologicalOutcome, bp: &str) {
        if is_telomere(bp) {
            return;
        }
        match self.index.resolve_band(bp) {
            Some(band) if !band.is_centromere() => outcome.add_fusion(band.index),
            _ => {}
        }
    }

    fn validate(&self, event: &Event) -> Result<()> {
        for chrom in &event.chromosomes {
            if !self.index.has_chromosome(chrom) {
                return Err(IscnError::validation(
                    ErrorCode::UnknownChromosome,
                    &event.text,
                    format!("chromosome {} is not in the band index", chrom),
                ));
            }
        }
        for nested in &event.nested {
            self.validate(nested)?;
        }
        Ok(())
    }

    fn sex_chromosome_gains(&self, outcome: &mut BiologicalOutcome, sex: &str) {
        let x = sex.chars().filter(|c| c.eq_ignore_ascii_case(&'x')).count() as u32;
        let y = sex.chars().filter(|c| c.eq_ignore_ascii_case(&'y')).count() as u32;
        if x + y <= 2 {
            return;
        }
        let (extra_x, extra_y) = if y > 0 {
            (x.saturating_sub(1), y - 1)
        } else {
            (x - 2, 0)
        };
        if extra_x > 0 {
            outcome.add_gain(self.index.whole_chromosome("x"), extra_x);
        }
        if extra_y > 0 {
            outcome.add_gain(self.index.whole_chromosome("y"), extra_y);
        }
    }
}

impl EventInterpreter for StandardEventInterpreter<'_> {
    fn process_missing_breakpoints(&self, clones: &mut RowClones) {
        process_missing_breakpoints(clones);
    }

    fn mark_uncertain_der_event(&self, clones: &mut RowClones) {
        mark_uncertain_der_event(clones);
    }

    fn karyotype_outcome(&self, clone: &CloneRecord) -> Result<BiologicalOutcome> {
        let mut outcome = BiologicalOutcome::for_index(self.index);
        self.sex_chromosome_gains(&mut outcome, &clone.sex);
        for event in &clone.events {
            self.apply(&mut outcome, event)?;
        }
        Ok(outcome)
    }
}

/// Signed per-band copy change of an abnormal chromosome
struct Content(Vec<i64>);

impl Content {
    fn new(len: usize) -> Self {
        Self(vec![0; len])
    }

    fn add(&mut self, bands: &[&Band], copies: i64) {
        for band in bands {
            if let Some(slot) = self.0.get_mut(band.index) {
                *slot += copies;
            }
        }
    }

    fn credit(&self, outcome: &mut BiologicalOutcome, index: &BandIndex) {
        for (i, &delta) in self.0.iter().enumerate() {
            let copies = delta.unsigned_abs() as u32;
            if delta > 0 {
                outcome.add_gain(index.decode(i), copies);
            } else if delta < 0 {
                outcome.add_loss(index.decode(i), copies);
            }
        }
    }
}
