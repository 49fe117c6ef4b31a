//! Typed detailed-system formulas
//!
//! A clause such as `der(13;15)(13pter->13q10::15q10->15q21)` is parsed into
//! a [`DetailedFormula`]: the keyword, the base chromosomes, an ordered list
//! of [`Element`]s and the ring flag.

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::char,
    error::{Error, ErrorKind},
    IResult, Parser,
};
use std::fmt;

use super::lexer::{tokenize, Token};

/// Keyword of a detailed clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaKind {
    /// `der(...)`
    Derivative,
    /// `dic(...)`
    Dicentric,
    /// `r(...)`
    Ring,
}

impl FormulaKind {
    /// The keyword as written
    pub fn keyword(&self) -> &'static str {
        match self {
            FormulaKind::Derivative => "der",
            FormulaKind::Dicentric => "dic",
            FormulaKind::Ring => "r",
        }
    }
}

/// A directed chromosome fragment `start->end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Start breakpoint, lowercase
    pub start: String,
    /// End breakpoint, lowercase
    pub end: String,
}

impl Segment {
    /// Create a segment
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into().to_ascii_lowercase(),
            end: end.into().to_ascii_lowercase(),
        }
    }

    /// Chromosome the segment comes from, taken from its start token.
    pub fn chromosome(&self) -> Option<String> {
        crate::bands::chromosome_of(&self.start)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.start, self.end)
    }
}

/// One `::`-separated element of a formula body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A directed segment
    Segment(Segment),
    /// A breakpoint standing on its own
    Breakpoint(String),
    /// Homogeneously staining region
    Hsr,
    /// Anything else (e.g. `a->b->c`)
    Malformed(String),
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Segment(segment) => write!(f, "{}", segment),
            Element::Breakpoint(band) => write!(f, "{}", band),
            Element::Hsr => write!(f, "hsr"),
            Element::Malformed(raw) => write!(f, "{}", raw),
        }
    }
}

/// A parsed detailed-system clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedFormula {
    /// Clause keyword
    pub kind: FormulaKind,
    /// Base chromosomes, lowercase (two for a dicentric)
    pub base_chromosomes: Vec<String>,
    /// Body elements in written order
    pub elements: Vec<Element>,
    /// Body was wrapped in leading and trailing `::`
    pub ring: bool,
}

impl DetailedFormula {
    /// Parse one clause.
    ///
    /// Returns `None` unless the clause is shaped `der(..)(..)`, `dic(..)(..)`
    /// or `r(..)(..)` with `->` or `::` in its body.
    pub fn parse(clause: &str) -> Option<Self> {
        let (rest, (kind, base, body)) = clause_parts(clause.trim()).ok()?;
        if !rest.is_empty() || !has_detailed_body(body) {
            return None;
        }

        let base_chromosomes = base
            .split(';')
            .map(|c| c.trim().to_ascii_lowercase())
            .filter(|c| !c.is_empty())
            .collect();

        let mut tokens = tokenize(body);
        let ring = tokens.len() >= 2
            && tokens.first() == Some(&Token::Join)
            && tokens.last() == Some(&Token::Join);
        if ring {
            tokens.remove(0);
            tokens.pop();
        }

        let elements = tokens
            .split(|t| *t == Token::Join)
            .filter(|group| !group.is_empty())
            .map(element)
            .collect();

        Some(Self {
            kind,
            base_chromosomes,
            elements,
            ring,
        })
    }

    /// Directed segments in written order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.elements.iter().filter_map(|e| match e {
            Element::Segment(s) => Some(s),
            _ => None,
        })
    }

    /// True if the chromosome is one of the base chromosomes.
    pub fn is_base(&self, chromosome: &str) -> bool {
        self.base_chromosomes
            .iter()
            .any(|c| c.eq_ignore_ascii_case(chromosome))
    }
}

impl fmt::Display for DetailedFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .elements
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("::");
        let body = if self.ring {
            format!("::{}::", body)
        } else {
            body
        };
        write!(
            f,
            "{}({})({})",
            self.kind.keyword(),
            self.base_chromosomes.join(";"),
            body
        )
    }
}

/// True if the clause is a detailed-system formula.
pub fn is_detailed_clause(clause: &str) -> bool {
    match clause_parts(clause.trim()) {
        Ok((_, (_, _, body))) => has_detailed_body(body),
        Err(_) => false,
    }
}

/// True if a body uses detailed-system syntax.
pub fn has_detailed_body(body: &str) -> bool {
    body.contains("->") || body.contains("::")
}

fn element(group: &[Token<'_>]) -> Element {
    match group {
        [Token::Text(t)] if t.eq_ignore_ascii_case("hsr") => Element::Hsr,
        [Token::Text(t)] => Element::Breakpoint(t.to_ascii_lowercase()),
        [Token::Text(start), Token::Arrow, Token::Text(end)] => {
            Element::Segment(Segment::new(*start, *end))
        }
        _ => Element::Malformed(
            group
                .iter()
                .map(|t| match t {
                    Token::Join => "::",
                    Token::Arrow => "->",
                    Token::Text(text) => *text,
                })
                .collect::<String>()
                .to_ascii_lowercase(),
        ),
    }
}

fn clause_parts(input: &str) -> IResult<&str, (FormulaKind, &str, &str)> {
    let (input, kind) = alt((
        tag_no_case("der").map(|_| FormulaKind::Derivative),
        tag_no_case("dic").map(|_| FormulaKind::Dicentric),
        tag_no_case("r").map(|_| FormulaKind::Ring),
    ))
    .parse(input)?;
    let (input, base) = parenthesized(input)?;
    let (input, body) = parenthesized(input)?;
    Ok((input, (kind, base, body)))
}

/// Consume one balanced parenthesis group, returning its contents.
pub(crate) fn parenthesized(input: &str) -> IResult<&str, &str> {
    let (rest, _) = char('(').parse(input)?;
    let mut depth = 1usize;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&rest[i + 1..], &rest[..i]));
                }
            }
            _ => {}
        }
    }
    Err(nom::Err::Error(Error::new(input, ErrorKind::Char)))
}
