//! Standard ISCN pipeline
//!
//! The orchestrator talks to the standard pipeline through two seams:
//!
//! - [`StandardParser`] turns karyotype text into typed clone records or a
//!   syntax rejection, and can re-lex rejected text permissively to collect
//!   positional token errors.
//! - [`EventInterpreter`] turns the events of one clone into a
//!   [`BiologicalOutcome`], after the pre-processing hooks have flagged
//!   events whose breakpoints cannot be quantified.
//!
//! [`IscnParser`] and [`StandardEventInterpreter`] are the built-in
//! implementations.
//!
//! # Example
//!
//! ```
//! use ferro_iscn::standard::{IscnParser, StandardParser};
//!
//! let clones = IscnParser::new().parse("46,XX,del(5)(q13q31)[20]").unwrap();
//! assert_eq!(clones.len(), 1);
//! assert_eq!(clones[0].cell_count, Some(20));
//! ```

pub mod hooks;
pub mod interpret;
pub mod parser;

pub use interpret::StandardEventInterpreter;
pub use parser::IscnParser;

use serde::Serialize;
use std::fmt;

use crate::error::{IscnError, TokenError};
use crate::outcome::BiologicalOutcome;

/// Clone records of one karyotype string, in written order
pub type RowClones = Vec<CloneRecord>;

/// Sign prefix of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// `+`: extra copy
    Plus,
    /// `-`: missing copy
    Minus,
}

impl Sign {
    fn symbol(&self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// Event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Whole-chromosome gain or loss (`+7`, `-Y`)
    Numerical,
    /// Marker chromosome (`+mar`, `+2mar`)
    Marker,
    /// `del`
    Deletion,
    /// `dup`
    Duplication,
    /// `trp`
    Triplication,
    /// `qdp`
    Quadruplication,
    /// `inv`
    Inversion,
    /// `t`
    Translocation,
    /// `ins`
    Insertion,
    /// `add`
    Addition,
    /// `i`
    Isochromosome,
    /// `idic`
    Isodicentric,
    /// `dic`
    Dicentric,
    /// `r`
    Ring,
    /// `der`
    Derivative,
}

impl EventKind {
    /// The ISCN keyword for structural events
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            EventKind::Numerical | EventKind::Marker => None,
            EventKind::Deletion => Some("del"),
            EventKind::Duplication => Some("dup"),
            EventKind::Triplication => Some("trp"),
            EventKind::Quadruplication => Some("qdp"),
            EventKind::Inversion => Some("inv"),
            EventKind::Translocation => Some("t"),
            EventKind::Insertion => Some("ins"),
            EventKind::Addition => Some("add"),
            EventKind::Isochromosome => Some("i"),
            EventKind::Isodicentric => Some("idic"),
            EventKind::Dicentric => Some("dic"),
            EventKind::Ring => Some("r"),
            EventKind::Derivative => Some("der"),
        }
    }

    /// True for events carrying chromosome and band groups
    pub fn is_structural(&self) -> bool {
        self.keyword().is_some()
    }
}

/// One parsed karyotype event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Event type
    pub kind: EventKind,
    /// Leading `+`/`-`
    pub sign: Option<Sign>,
    /// Chromosomes named in the first group, lowercase
    pub chromosomes: Vec<String>,
    /// Band groups, one per chromosome, as full band names (`5q13`)
    pub breakpoints: Vec<Vec<String>>,
    /// Events nested after a `der(...)` head
    pub nested: Vec<Event>,
    /// Copies for numerical and marker events
    pub copies: u32,
    /// Constitutional (`c` suffix)
    pub constitutional: bool,
    /// Breakpoints cannot be quantified; set by the pre-processing hooks
    pub uncertain: bool,
    /// Event text as written
    pub text: String,
}

impl Event {
    /// Create an event with no groups.
    pub fn new(kind: EventKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            sign: None,
            chromosomes: Vec::new(),
            breakpoints: Vec::new(),
            nested: Vec::new(),
            copies: 1,
            constitutional: false,
            uncertain: false,
            text: text.into(),
        }
    }

    /// The first chromosome named, if any
    pub fn chromosome(&self) -> Option<&str> {
        self.chromosomes.first().map(String::as_str)
    }

    /// True if no band group was written
    pub fn has_breakpoints(&self) -> bool {
        self.breakpoints.iter().any(|g| !g.is_empty())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.text.is_empty() {
            return write!(f, "{}", self.text);
        }
        if let Some(sign) = self.sign {
            write!(f, "{}", sign.symbol())?;
        }
        match self.kind.keyword() {
            Some(keyword) => write!(f, "{}({})", keyword, self.chromosomes.join(";")),
            None => write!(f, "{}", self.chromosomes.join(";")),
        }
    }
}

/// How a clone relates to earlier clones of the same karyotype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CloneRelationship {
    /// First clone of a multi-clone karyotype
    Stemline,
    /// `idem`: stemline plus additional events
    Idem,
    /// `sl`: stemline plus additional events
    Sideline,
    /// `sdl`: previous clone plus additional events
    Subline,
    /// Written out in full
    Independent,
}

/// One clone of a karyotype
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloneRecord {
    /// Clone text without its cell count
    pub code: String,
    /// Chromosome count (lower bound of a range)
    pub modal: u32,
    /// Upper bound of a `~` range
    pub modal_max: Option<u32>,
    /// Sex chromosomes (`XX`, `XY`, `X`, ...), possibly inherited
    pub sex: String,
    /// Relationship to earlier clones
    pub relationship: CloneRelationship,
    /// Events, inherited events first
    pub events: Vec<Event>,
    /// Cells counted (`[20]`)
    pub cell_count: Option<u32>,
    /// Composite karyotype (`[cp20]`)
    pub composite: bool,
}

/// A grammar rejection from [`StandardParser::parse`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxRejection {
    /// Byte offset where parsing stopped
    pub position: usize,
    /// Description of what was expected
    pub message: String,
}

impl SyntaxRejection {
    /// Create a rejection
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for SyntaxRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)
    }
}

/// Grammar parser for standard ISCN notation
pub trait StandardParser {
    /// Parse karyotype text into clone records.
    fn parse(&self, text: &str) -> Result<RowClones, SyntaxRejection>;

    /// Re-lex text permissively, collecting every offending token.
    fn token_errors(&self, text: &str) -> Vec<TokenError>;
}

/// Interpreter for standard events
pub trait EventInterpreter {
    /// Flag structural events whose band groups are missing or do not match
    /// their chromosomes.
    fn process_missing_breakpoints(&self, clones: &mut RowClones);

    /// Flag derivatives that cannot be quantified.
    fn mark_uncertain_der_event(&self, clones: &mut RowClones);

    /// Loss/gain/fusion outcome of one clone.
    fn karyotype_outcome(&self, clone: &CloneRecord) -> Result<BiologicalOutcome, IscnError>;
}
