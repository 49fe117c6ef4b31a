//! Interpretation results
//!
//! A [`KaryotypeReport`] holds one [`CloneReport`] per clone, in written
//! order. The accessors expose the per-clone fields as parallel lists.

use serde::Serialize;
use std::fmt;

use crate::outcome::BiologicalOutcome;
use crate::standard::CloneRelationship;

/// Pipeline that produced a clone's outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pipeline {
    /// Standard grammar parser and event interpreter
    Standard,
    /// Detailed-system interpreter
    Detailed,
    /// Both, merged element-wise
    Mixed,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pipeline::Standard => write!(f, "standard"),
            Pipeline::Detailed => write!(f, "detailed"),
            Pipeline::Mixed => write!(f, "mixed"),
        }
    }
}

/// Result for one clone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloneReport {
    /// Clone text without its cell count
    pub code: String,
    /// Cells counted
    pub cell_count: Option<u32>,
    /// Relationship to earlier clones
    pub relationship: CloneRelationship,
    /// Pipeline used
    pub pipeline: Pipeline,
    /// Loss/gain/fusion outcome; `None` when nothing could be decoded
    pub outcome: Option<BiologicalOutcome>,
}

impl CloneReport {
    /// True if an outcome was produced.
    pub fn is_decoded(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Result for one karyotype string
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KaryotypeReport {
    /// Input as given
    pub input: String,
    /// Input with quotes, whitespace and `?` removed
    pub normalized: String,
    /// Clones in written order
    pub clones: Vec<CloneReport>,
}

impl KaryotypeReport {
    /// One outcome per clone.
    pub fn outcomes(&self) -> Vec<Option<&BiologicalOutcome>> {
        self.clones.iter().map(|c| c.outcome.as_ref()).collect()
    }

    /// One clone code per clone.
    pub fn clone_codes(&self) -> Vec<&str> {
        self.clones.iter().map(|c| c.code.as_str()).collect()
    }

    /// One cell count per clone.
    pub fn cell_counts(&self) -> Vec<Option<u32>> {
        self.clones.iter().map(|c| c.cell_count).collect()
    }

    /// One relationship per clone.
    pub fn relationships(&self) -> Vec<CloneRelationship> {
        self.clones.iter().map(|c| c.relationship).collect()
    }

    /// Number of clones.
    pub fn len(&self) -> usize {
        self.clones.len()
    }

    /// True if no clone was reported.
    pub fn is_empty(&self) -> bool {
        self.clones.is_empty()
    }
}
