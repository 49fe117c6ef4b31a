//! Loss/gain/fusion outcome vectors
//!
//! A [`BiologicalOutcome`] holds three count vectors indexed by band position.
//! Counts accumulate: two overlapping deletions give a loss of 2. Each
//! outcome owns its vectors; merging produces a new outcome.

use serde::{Deserialize, Serialize};

use crate::bands::{band_index, Band, BandIndex};

/// Loss, gain and fusion counts per band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiologicalOutcome {
    /// Copies lost per band
    pub loss: Vec<u32>,
    /// Copies gained per band
    pub gain: Vec<u32>,
    /// Fusion breakpoints per band
    pub fusion: Vec<u32>,
    /// Events that could not be quantified
    pub uncertain_events: Vec<String>,
    /// Detailed-system clauses consumed
    pub detailed_system: Vec<String>,
}

impl BiologicalOutcome {
    /// Zeroed outcome sized to the global band index.
    pub fn new() -> Self {
        Self::with_len(band_index().len())
    }

    /// Zeroed outcome sized to an index.
    pub fn for_index(index: &BandIndex) -> Self {
        Self::with_len(index.len())
    }

    fn with_len(len: usize) -> Self {
        Self {
            loss: vec![0; len],
            gain: vec![0; len],
            fusion: vec![0; len],
            uncertain_events: Vec::new(),
            detailed_system: Vec::new(),
        }
    }

    /// Number of bands covered.
    pub fn len(&self) -> usize {
        self.loss.len()
    }

    /// True if the vectors are empty.
    pub fn is_empty(&self) -> bool {
        self.loss.is_empty()
    }

    /// Credit `copies` losses to every band.
    pub fn add_loss<'a>(&mut self, bands: impl IntoIterator<Item = &'a Band>, copies: u32) {
        credit(&mut self.loss, bands, copies);
    }

    /// Credit `copies` gains to every band.
    pub fn add_gain<'a>(&mut self, bands: impl IntoIterator<Item = &'a Band>, copies: u32) {
        credit(&mut self.gain, bands, copies);
    }

    /// Mark one fusion point.
    pub fn add_fusion(&mut self, index: usize) {
        if let Some(slot) = self.fusion.get_mut(index) {
            *slot += 1;
        }
    }

    /// Record an event that carries no quantifiable LGF contribution.
    pub fn note_uncertain(&mut self, note: impl Into<String>) {
        self.uncertain_events.push(note.into());
    }

    /// Loss count at a position.
    pub fn loss_at(&self, index: usize) -> u32 {
        self.loss.get(index).copied().unwrap_or(0)
    }

    /// Gain count at a position.
    pub fn gain_at(&self, index: usize) -> u32 {
        self.gain.get(index).copied().unwrap_or(0)
    }

    /// Fusion count at a position.
    pub fn fusion_at(&self, index: usize) -> u32 {
        self.fusion.get(index).copied().unwrap_or(0)
    }

    /// Positions with a non-zero loss.
    pub fn lost(&self) -> Vec<usize> {
        nonzero(&self.loss)
    }

    /// Positions with a non-zero gain.
    pub fn gained(&self) -> Vec<usize> {
        nonzero(&self.gain)
    }

    /// Positions with a non-zero fusion count.
    pub fn fused(&self) -> Vec<usize> {
        nonzero(&self.fusion)
    }

    /// True if no counts and no notes were recorded.
    pub fn is_neutral(&self) -> bool {
        self.loss.iter().chain(&self.gain).chain(&self.fusion).all(|&c| c == 0)
            && self.uncertain_events.is_empty()
    }

    /// Add another outcome into this one, element-wise.
    pub fn absorb(&mut self, other: BiologicalOutcome) {
        add_into(&mut self.loss, &other.loss);
        add_into(&mut self.gain, &other.gain);
        add_into(&mut self.fusion, &other.fusion);
        self.uncertain_events.extend(other.uncertain_events);
        self.detailed_system.extend(other.detailed_system);
    }

    /// Element-wise merge of two optional outcomes.
    ///
    /// An absent side returns the other unchanged; two absent sides produce
    /// no outcome, which callers report as undecoded.
    pub fn merge(
        left: Option<BiologicalOutcome>,
        right: Option<BiologicalOutcome>,
    ) -> Option<BiologicalOutcome> {
        match (left, right) {
            (Some(mut l), Some(r)) => {
                l.absorb(r);
                Some(l)
            }
            (Some(l), None) => Some(l),
            (None, r) => r,
        }
    }
}

impl Default for BiologicalOutcome {
    fn default() -> Self {
        Self::new()
    }
}

fn credit<'a>(slots: &mut [u32], bands: impl IntoIterator<Item = &'a Band>, copies: u32) {
    for band in bands {
        if let Some(slot) = slots.get_mut(band.index) {
            *slot += copies;
        }
    }
}

fn add_into(target: &mut Vec<u32>, source: &[u32]) {
    if target.len() < source.len() {
        target.resize(source.len(), 0);
    }
    for (t, s) in target.iter_mut().zip(source) {
        *t += s;
    }
}

fn nonzero(values: &[u32]) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, c)| **c > 0)
        .map(|(i, _)| i)
        .collect()
}
