//! Interval queries over the band index
//!
//! Ranges are inclusive of both breakpoints. Telomere-anchored ranges keep the
//! historical asymmetry of the interval branch versus the `pter` branch:
//! only the plain interval branch swaps out-of-order endpoints.

use super::{chromosome_of, is_pter, is_qter, Arm, Band, BandIndex};

impl BandIndex {
    /// Bands between two breakpoints, inclusive.
    ///
    /// - Neither token is a telomere: both resolve (else empty), endpoints are
    ///   swapped if needed and every band in `[lo, hi]` is returned.
    /// - `start` is a `pter` token: bands of that chromosome's p arm between
    ///   its `p10` anchor and `end`, without swapping. A distal `end` therefore
    ///   yields nothing.
    /// - `end` is a `qter` token: the q-arm bands met while scanning forward
    ///   from `start` to the end of its chromosome.
    ///
    /// Reversed telomere orientation (`7qter`→`7q22`, `7q22`→`7pter`) is
    /// flipped first, and `pter`→`qter` of one chromosome is the whole
    /// chromosome.
    pub fn bands_between(&self, start: &str, end: &str) -> Vec<&Band> {
        let start = start.trim().to_ascii_lowercase();
        let end = end.trim().to_ascii_lowercase();

        match (telomere_arm(&start), telomere_arm(&end)) {
            (None, None) => self.interval(&start, &end),
            (Some(Arm::P), Some(Arm::Q)) | (Some(Arm::Q), Some(Arm::P)) => {
                match (chromosome_of(&start), chromosome_of(&end)) {
                    (Some(a), Some(b)) if a == b => self.whole_chromosome(&a),
                    _ => Vec::new(),
                }
            }
            (Some(Arm::P), _) => self.from_centromere(&start, &end),
            (_, Some(Arm::Q)) => self.to_q_telomere(&start),
            (Some(Arm::Q), None) => self.to_q_telomere(&end),
            (None, Some(Arm::P)) => self.from_centromere(&end, &start),
        }
    }

    /// Every band of one arm, in index order.
    pub fn bands_of_arm(&self, chromosome: &str, arm: Arm) -> Vec<&Band> {
        self.chromosome_bands(chromosome)
            .iter()
            .filter(|b| b.arm == arm)
            .collect()
    }

    /// Every band of a chromosome, p-telomere first.
    pub fn whole_chromosome(&self, chromosome: &str) -> Vec<&Band> {
        self.chromosome_bands(chromosome).iter().collect()
    }

    /// Bands from the p-telomere of `chromosome` up to and including
    /// `breakpoint`.
    ///
    /// A `qter` breakpoint covers the whole chromosome. Breakpoints that do
    /// not resolve onto the chromosome yield nothing.
    pub fn bands_from_pter(&self, chromosome: &str, breakpoint: &str) -> Vec<&Band> {
        let Some(span) = self.chromosome_span(chromosome) else {
            return Vec::new();
        };
        if is_qter(breakpoint) {
            return self.bands[span].iter().collect();
        }
        if is_pter(breakpoint) {
            return Vec::new();
        }
        match self.resolve(breakpoint) {
            Some(i) if span.contains(&i) => self.bands[span.start..=i].iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Bands distal to a breakpoint, the breakpoint included.
    ///
    /// p-arm breakpoints extend to the p-telomere, q-arm breakpoints to the
    /// q-telomere.
    pub fn distal_bands(&self, chromosome: &str, breakpoint: &str) -> Vec<&Band> {
        match super::arm_of(breakpoint) {
            Some(Arm::P) => self.bands_from_pter(chromosome, breakpoint),
            Some(Arm::Q) => {
                self.bands_between(breakpoint, &super::telomere_band(chromosome, Arm::Q))
            }
            None => Vec::new(),
        }
    }

    fn chromosome_bands(&self, chromosome: &str) -> &[Band] {
        match self.chromosome_span(chromosome) {
            Some(span) => &self.bands[span],
            None => &[],
        }
    }

    fn interval(&self, start: &str, end: &str) -> Vec<&Band> {
        let (Some(a), Some(b)) = (self.resolve(start), self.resolve(end)) else {
            return Vec::new();
        };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.bands[lo..=hi].iter().collect()
    }

    fn from_centromere(&self, telomere: &str, end: &str) -> Vec<&Band> {
        let Some(chrom) = chromosome_of(telomere) else {
            return Vec::new();
        };
        let centromere = format!("{}p10", chrom);
        let (Some(lo), Some(hi)) = (self.resolve(&centromere), self.resolve(end)) else {
            return Vec::new();
        };
        if lo > hi {
            return Vec::new();
        }
        self.bands[lo..=hi]
            .iter()
            .filter(|b| b.chromosome == chrom && b.arm == Arm::P)
            .collect()
    }

    fn to_q_telomere(&self, start: &str) -> Vec<&Band> {
        let Some(from) = self.resolve(start) else {
            return Vec::new();
        };
        let chrom = &self.bands[from].chromosome;
        self.bands[from..]
            .iter()
            .take_while(|b| &b.chromosome == chrom)
            .filter(|b| b.arm == Arm::Q)
            .collect()
    }
}

fn telomere_arm(token: &str) -> Option<Arm> {
    if is_pter(token) {
        Some(Arm::P)
    } else if is_qter(token) {
        Some(Arm::Q)
    } else {
        None
    }
}
