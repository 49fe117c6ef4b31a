//! Genome-wide cytogenetic band index
//!
//! Every real band of chromosomes 1..22, X and Y is assigned a stable integer
//! position. Positions increase along each chromosome from the p-telomere,
//! through the `p10`/`q10` centromere anchors, to the q-telomere, chromosomes
//! in turn. Names are canonical lowercase strings such as `16p11.1` or
//! `xq28`.
//!
//! The index is built once, on first use, and shared read-only afterwards:
//!
//! ```
//! use ferro_iscn::bands::band_index;
//!
//! let index = band_index();
//! let i = index.resolve("16P11").unwrap();
//! assert_eq!(index.decode(i).unwrap().name, "16p11.1");
//! ```
//!
//! Telomere tokens (`7pter`, `7qter`) are anchors, not bands; range queries
//! in [`range`] resolve them to the extreme bands of the relevant arm.

pub mod range;
pub(crate) mod table;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use table::CHROMOSOME_BANDS;

static BAND_INDEX: Lazy<BandIndex> = Lazy::new(BandIndex::build);

/// The process-wide band index.
///
/// Construction happens exactly once even under concurrent first access;
/// reads afterwards take no lock.
pub fn band_index() -> &'static BandIndex {
    &BAND_INDEX
}

/// Chromosome arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arm {
    /// Short arm
    P,
    /// Long arm
    Q,
}

impl Arm {
    /// Parse an arm letter (case-insensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Arm::P),
            'q' => Some(Arm::Q),
            _ => None,
        }
    }

    /// The arm letter as written in band names.
    pub fn as_char(&self) -> char {
        match self {
            Arm::P => 'p',
            Arm::Q => 'q',
        }
    }

    /// The other arm of the same chromosome.
    pub fn opposite(&self) -> Self {
        match self {
            Arm::P => Arm::Q,
            Arm::Q => Arm::P,
        }
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single indexed band
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Band {
    /// Position in the genome-wide index
    pub index: usize,
    /// Canonical lowercase name, e.g. `16p11.1`
    pub name: String,
    /// Lowercase chromosome name (`1`..`22`, `x`, `y`)
    pub chromosome: String,
    /// Arm the band lies on
    pub arm: Arm,
}

impl Band {
    /// True for the `p10`/`q10` centromere anchors.
    pub fn is_centromere(&self) -> bool {
        &self.name[self.chromosome.len() + 1..] == "10"
    }

    /// Region number of the band (`36` for `1p36.33`).
    pub fn region(&self) -> Option<u32> {
        region_number(&self.name[self.chromosome.len() + 1..])
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Bijection between band names and genome-wide positions
#[derive(Debug, Clone)]
pub struct BandIndex {
    bands: Vec<Band>,
    by_name: HashMap<String, usize>,
    by_stripped: HashMap<String, usize>,
    spans: HashMap<String, Range<usize>>,
    max_regions: HashMap<(String, Arm), u32>,
}

impl BandIndex {
    fn build() -> Self {
        let mut bands = Vec::new();
        let mut spans = HashMap::new();

        for (chrom, p_arm, q_arm) in CHROMOSOME_BANDS {
            let first = bands.len();
            let p_names = p_arm.iter().copied().chain(std::iter::once("10"));
            let q_names = std::iter::once("10").chain(q_arm.iter().copied());
            for (arm, sub_band) in p_names
                .map(|b| (Arm::P, b))
                .chain(q_names.map(|b| (Arm::Q, b)))
            {
                bands.push(Band {
                    index: bands.len(),
                    name: format!("{}{}{}", chrom, arm, sub_band),
                    chromosome: chrom.to_string(),
                    arm,
                });
            }
            spans.insert(chrom.to_string(), first..bands.len());
        }

        let mut by_name = HashMap::with_capacity(bands.len());
        let mut by_stripped = HashMap::new();
        let mut max_regions: HashMap<(String, Arm), u32> = HashMap::new();
        for band in &bands {
            by_name.insert(band.name.clone(), band.index);
            // First entry in index order wins
            by_stripped
                .entry(strip_sub_band(&band.name).to_string())
                .or_insert(band.index);
            if let Some(region) = band.region() {
                let max = max_regions
                    .entry((band.chromosome.clone(), band.arm))
                    .or_insert(region);
                *max = (*max).max(region);
            }
        }

        Self {
            bands,
            by_name,
            by_stripped,
            spans,
            max_regions,
        }
    }

    /// Total number of indexed bands (the length of every LGF vector).
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Always false for the built-in table.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// All bands in index order.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// The band at a position.
    pub fn decode(&self, index: usize) -> Option<&Band> {
        self.bands.get(index)
    }

    /// Resolve a breakpoint token to a position.
    ///
    /// Fallbacks, first hit wins:
    /// 1. exact case-insensitive name;
    /// 2. the token's first sub-band (`token.1`);
    /// 3. the token without its sub-band decimal, against table names stripped
    ///    the same way (first in index order);
    /// 4. the first name, in index order, starting with the token.
    ///
    /// Returns `None` when nothing matches; callers skip such tokens.
    pub fn resolve(&self, token: &str) -> Option<usize> {
        let key = token.trim().to_ascii_lowercase();
        if key.is_empty() {
            return None;
        }
        if let Some(&i) = self.by_name.get(&key) {
            return Some(i);
        }
        if let Some(&i) = self.by_name.get(&format!("{}.1", key)) {
            return Some(i);
        }
        if let Some(&i) = self.by_stripped.get(strip_sub_band(&key)) {
            return Some(i);
        }
        self.bands.iter().position(|b| b.name.starts_with(&key))
    }

    /// Resolve a token straight to its band.
    pub fn resolve_band(&self, token: &str) -> Option<&Band> {
        self.resolve(token).and_then(|i| self.decode(i))
    }

    /// Index range covered by a chromosome.
    pub fn chromosome_span(&self, chromosome: &str) -> Option<Range<usize>> {
        self.spans.get(&chromosome.to_ascii_lowercase()).cloned()
    }

    /// True if the chromosome is part of the index.
    pub fn has_chromosome(&self, chromosome: &str) -> bool {
        self.spans.contains_key(&chromosome.to_ascii_lowercase())
    }

    /// Highest region number on an arm (`26` for `15q`).
    pub fn max_region(&self, chromosome: &str, arm: Arm) -> Option<u32> {
        self.max_regions
            .get(&(chromosome.to_ascii_lowercase(), arm))
            .copied()
    }

    /// The telomere token for an unresolvable breakpoint lying past the end of
    /// its arm.
    ///
    /// `15q31` names a region beyond `15q26`, the last region of 15q, so it
    /// maps to `15qter`. Tokens that resolve, or that do not parse as
    /// `<chromosome><arm><region>`, yield `None`.
    pub fn telomere_beyond(&self, token: &str) -> Option<String> {
        let key = token.trim().to_ascii_lowercase();
        if self.resolve(&key).is_some() {
            return None;
        }
        let chrom = chromosome_of(&key)?;
        let arm = arm_of(&key)?;
        let region = region_number(&key[chrom.len() + 1..])?;
        let max = self.max_region(&chrom, arm)?;
        (region > max).then(|| telomere_band(&chrom, arm))
    }
}

fn strip_sub_band(name: &str) -> &str {
    name.split_once('.').map_or(name, |(head, _)| head)
}

fn region_number(sub_band: &str) -> Option<u32> {
    let digits = sub_band.split('.').next()?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Chromosome named by a band or breakpoint token.
///
/// Leading digits name an autosome; otherwise a leading `X`/`Y` names a sex
/// chromosome. The result is lowercase: `chromosome_of("Xq21") == Some("x")`.
pub fn chromosome_of(token: &str) -> Option<String> {
    let token = token.trim();
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() {
        return Some(digits);
    }
    match token.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some(c @ ('x' | 'y')) => Some(c.to_string()),
        _ => None,
    }
}

/// Arm named by a band or breakpoint token (`7q31` → q).
pub fn arm_of(token: &str) -> Option<Arm> {
    let chrom = chromosome_of(token)?;
    token.trim()[chrom.len()..].chars().next().and_then(Arm::from_char)
}

/// The telomere token of an arm, e.g. `7qter`.
pub fn telomere_band(chromosome: &str, arm: Arm) -> String {
    format!("{}{}ter", chromosome.to_ascii_lowercase(), arm)
}

/// True if the token names a p-arm telomere.
pub fn is_pter(token: &str) -> bool {
    token.to_ascii_lowercase().contains("pter")
}

/// True if the token names a q-arm telomere.
pub fn is_qter(token: &str) -> bool {
    token.to_ascii_lowercase().contains("qter")
}

/// True for either telomere marker.
pub fn is_telomere(token: &str) -> bool {
    is_pter(token) || is_qter(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_bijective() {
        let index = band_index();
        for (i, band) in index.bands().iter().enumerate() {
            assert_eq!(band.index, i);
            assert_eq!(index.resolve(&band.name), Some(i));
        }
    }

    #[test]
    fn test_centromeres_sit_between_arms() {
        let index = band_index();
        let p11 = index.resolve("16p11.1").unwrap();
        let p10 = index.resolve("16p10").unwrap();
        let q10 = index.resolve("16q10").unwrap();
        let q11 = index.resolve("16q11.1").unwrap();
        assert_eq!((p10, q10, q11), (p11 + 1, p11 + 2, p11 + 3));
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let index = band_index();
        assert_eq!(index.resolve("XQ28"), index.resolve("xq28"));
        assert!(index.resolve("Xq28").is_some());
    }

    #[test]
    fn test_resolve_first_sub_band() {
        let index = band_index();
        let i = index.resolve("7q11").unwrap();
        assert_eq!(index.decode(i).unwrap().name, "7q11.1");
    }

    #[test]
    fn test_resolve_stripped_form() {
        let index = band_index();
        // 8q21.1 is not a band; 8q21.11 is the first 8q21 entry
        let i = index.resolve("8q21").unwrap();
        assert_eq!(index.decode(i).unwrap().name, "8q21.11");
        let i = index.resolve("16p13").unwrap();
        assert_eq!(index.decode(i).unwrap().name, "16p13.3");
    }

    #[test]
    fn test_resolve_prefix_scan_is_ordered() {
        let index = band_index();
        let i = index.resolve("1q4").unwrap();
        assert_eq!(index.decode(i).unwrap().name, "1q41");
    }

    #[test]
    fn test_resolve_failures() {
        let index = band_index();
        assert_eq!(index.resolve(""), None);
        assert_eq!(index.resolve("15q31"), None);
        assert_eq!(index.resolve("7pter"), None);
        assert_eq!(index.resolve("hsr"), None);
    }

    #[test]
    fn test_max_region_and_clamp() {
        let index = band_index();
        assert_eq!(index.max_region("15", Arm::Q), Some(26));
        assert_eq!(index.telomere_beyond("15q31").as_deref(), Some("15qter"));
        assert_eq!(index.telomere_beyond("15q21"), None);
        assert_eq!(index.telomere_beyond("25q11"), None);
    }

    #[test]
    fn test_token_utilities() {
        assert_eq!(chromosome_of("13pter").as_deref(), Some("13"));
        assert_eq!(chromosome_of("Xq21").as_deref(), Some("x"));
        assert_eq!(chromosome_of("hsr"), None);
        assert_eq!(arm_of("7q31"), Some(Arm::Q));
        assert_eq!(arm_of("Yp11.2"), Some(Arm::P));
        assert_eq!(Arm::P.opposite(), Arm::Q);
        assert_eq!(telomere_band("X", Arm::Q), "xqter");
        assert!(is_pter("8PTER"));
        assert!(!is_telomere("8q24"));
    }

    #[test]
    fn test_band_region() {
        let band = band_index().resolve_band("1p36.33").unwrap();
        assert_eq!(band.region(), Some(36));
        assert!(!band.is_centromere());
        assert!(band_index().resolve_band("3q10").unwrap().is_centromere());
    }
}
