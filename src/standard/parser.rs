//! nom grammar for standard ISCN karyotypes
//!
//! ```text
//! karyotype  := clone ('/' clone)*
//! clone      := modal ',' head (',' event)* cells?
//! modal      := N ('~' N)?
//! head       := sex | 'idem' | 'sl' | 'sdl' N?
//! cells      := '[' 'cp'? N ']'
//! event      := ('+' | '-')? keyword '(' chroms ')' groups? nested* 'c'?
//!             | ('+' | '-') (N? 'mar' N? | chrom) 'c'?
//! ```
//!
//! The grammar is case-sensitive: keywords are lowercase and sex
//! chromosomes uppercase, as ISCN writes them.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, one_of},
    combinator::{opt, recognize},
    multi::{many0, many1, separated_list1},
    IResult, Parser,
};

use super::{
    CloneRecord, CloneRelationship, Event, EventKind, RowClones, Sign, StandardParser,
    SyntaxRejection,
};
use crate::error::{ErrorCode, SourceSpan, TokenError};

/// Built-in standard ISCN parser
#[derive(Debug, Clone, Copy, Default)]
pub struct IscnParser;

impl IscnParser {
    /// Create a parser
    pub fn new() -> Self {
        Self
    }
}

impl StandardParser for IscnParser {
    fn parse(&self, text: &str) -> Result<RowClones, SyntaxRejection> {
        let offset = |rest: &str| text.len() - rest.len();

        let (rest, raw) = match separated_list1(char('/'), raw_clone).parse(text) {
            Ok(parsed) => parsed,
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                return Err(SyntaxRejection::new(
                    offset(e.input),
                    "expected a chromosome count and sex chromosomes",
                ));
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(SyntaxRejection::new(text.len(), "unexpected end of input"));
            }
        };
        if !rest.is_empty() {
            return Err(SyntaxRejection::new(
                offset(rest),
                format!("unexpected '{}'", rest),
            ));
        }

        resolve_inheritance(raw)
    }

    fn token_errors(&self, text: &str) -> Vec<TokenError> {
        let mut errors = Vec::new();
        let mut clone_start = 0;
        for clone in split_top_level(text, '/') {
            scan_clone(clone, clone_start, &mut errors);
            clone_start += clone.len() + 1;
        }
        errors
    }
}

enum Head {
    Sex(String),
    Idem,
    Sideline,
    Subline(Option<u32>),
}

struct RawClone<'a> {
    code: &'a str,
    modal: (u32, Option<u32>),
    head: Head,
    events: Vec<Event>,
    cells: Option<(bool, u32)>,
}

fn raw_clone(input: &str) -> IResult<&str, RawClone<'_>> {
    let start = input;
    let (input, modal) = modal(input)?;
    let (input, _) = char(',').parse(input)?;
    let (input, head) = head(input)?;
    let (input, events) = many0((char(','), event).map(|(_, e)| e)).parse(input)?;
    let code = &start[..start.len() - input.len()];
    let (input, cells) = opt(cell_count).parse(input)?;
    Ok((
        input,
        RawClone {
            code,
            modal,
            head,
            events,
            cells,
        },
    ))
}

fn number(input: &str) -> IResult<&str, u32> {
    let (rest, digits) = digit1.parse(input)?;
    let value = digits.parse().map_err(|_| {
        nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
    })?;
    Ok((rest, value))
}

fn modal(input: &str) -> IResult<&str, (u32, Option<u32>)> {
    (number, opt((char('~'), number).map(|(_, n)| n))).parse(input)
}

fn head(input: &str) -> IResult<&str, Head> {
    alt((
        tag("idem").map(|_| Head::Idem),
        (tag("sdl"), opt(number)).map(|(_, n)| Head::Subline(n)),
        tag("sl").map(|_| Head::Sideline),
        take_while1(|c| c == 'X' || c == 'Y').map(|s: &str| Head::Sex(s.to_string())),
    ))
    .parse(input)
}

fn cell_count(input: &str) -> IResult<&str, (bool, u32)> {
    let (input, _) = char('[').parse(input)?;
    let (input, composite) = opt(tag("cp")).parse(input)?;
    let (input, cells) = number(input)?;
    let (input, _) = char(']').parse(input)?;
    Ok((input, (composite.is_some(), cells)))
}

fn sign(input: &str) -> IResult<&str, Sign> {
    alt((char('+').map(|_| Sign::Plus), char('-').map(|_| Sign::Minus))).parse(input)
}

fn chromosome(input: &str) -> IResult<&str, &str> {
    alt((digit1, tag("X"), tag("Y"))).parse(input)
}

/// One comma-separated event.
pub(crate) fn event(input: &str) -> IResult<&str, Event> {
    alt((structural, numerical)).parse(input)
}

fn numerical(input: &str) -> IResult<&str, Event> {
    let start = input;
    let (input, sign) = sign(input)?;
    let (input, mut event) = alt((marker, whole_chromosome)).parse(input)?;
    let (input, constitutional) = opt(char('c')).parse(input)?;
    event.sign = Some(sign);
    event.constitutional = constitutional.is_some();
    event.text = start[..start.len() - input.len()].to_string();
    Ok((input, event))
}

fn marker(input: &str) -> IResult<&str, Event> {
    let (input, (copies, _, _)) = (opt(number), tag("mar"), opt(digit1)).parse(input)?;
    let mut event = Event::new(EventKind::Marker, "");
    event.copies = copies.unwrap_or(1);
    Ok((input, event))
}

fn whole_chromosome(input: &str) -> IResult<&str, Event> {
    let (input, chrom) = chromosome(input)?;
    let mut event = Event::new(EventKind::Numerical, "");
    event.chromosomes.push(chrom.to_ascii_lowercase());
    Ok((input, event))
}

fn keyword(input: &str) -> IResult<&str, EventKind> {
    alt((
        tag("idic").map(|_| EventKind::Isodicentric),
        tag("ins").map(|_| EventKind::Insertion),
        tag("inv").map(|_| EventKind::Inversion),
        tag("i").map(|_| EventKind::Isochromosome),
        tag("del").map(|_| EventKind::Deletion),
        tag("der").map(|_| EventKind::Derivative),
        tag("dic").map(|_| EventKind::Dicentric),
        tag("dup").map(|_| EventKind::Duplication),
        tag("add").map(|_| EventKind::Addition),
        tag("trp").map(|_| EventKind::Triplication),
        tag("qdp").map(|_| EventKind::Quadruplication),
        tag("t").map(|_| EventKind::Translocation),
        tag("r").map(|_| EventKind::Ring),
    ))
    .parse(input)
}

fn structural(input: &str) -> IResult<&str, Event> {
    let start = input;
    let (input, sign) = opt(sign).parse(input)?;
    let (input, mut event) = structural_body(input)?;
    let (input, constitutional) = opt(char('c')).parse(input)?;
    event.sign = sign;
    event.constitutional = constitutional.is_some();
    event.text = start[..start.len() - input.len()].to_string();
    Ok((input, event))
}

fn structural_body(input: &str) -> IResult<&str, Event> {
    let start = input;
    let (input, kind) = keyword(input)?;
    let (input, _) = char('(').parse(input)?;
    let (input, chroms) =
        separated_list1(char(';'), (chromosome, opt(one_of("pq")))).parse(input)?;
    let (input, _) = char(')').parse(input)?;
    let (input, groups) = opt(band_groups).parse(input)?;

    let mut event = Event::new(kind, "");
    event.chromosomes = chroms
        .iter()
        .map(|(c, _)| c.to_ascii_lowercase())
        .collect();

    match groups {
        Some(groups) => {
            event.breakpoints = groups
                .into_iter()
                .enumerate()
                .map(|(i, bands)| {
                    let chrom = event
                        .chromosomes
                        .get(i)
                        .or(event.chromosomes.last())
                        .cloned()
                        .unwrap_or_default();
                    bands
                        .into_iter()
                        .map(|b| format!("{}{}", chrom, b))
                        .collect()
                })
                .collect();
        }
        // i(17q) names the arm instead of a q10/p10 breakpoint
        None => {
            event.breakpoints = chroms
                .iter()
                .filter_map(|(c, arm)| {
                    arm.map(|a| vec![format!("{}{}10", c.to_ascii_lowercase(), a)])
                })
                .collect();
        }
    }

    let (input, nested) = if kind == EventKind::Derivative {
        many0(structural_body).parse(input)?
    } else {
        (input, Vec::new())
    };
    event.nested = nested;
    event.text = start[..start.len() - input.len()].to_string();
    Ok((input, event))
}

fn band_groups(input: &str) -> IResult<&str, Vec<Vec<&str>>> {
    let (input, _) = char('(').parse(input)?;
    let (input, groups) = separated_list1(char(';'), many1(band)).parse(input)?;
    let (input, _) = char(')').parse(input)?;
    Ok((input, groups))
}

fn band(input: &str) -> IResult<&str, &str> {
    recognize((
        one_of("pq"),
        alt((tag("ter"), recognize((digit1, opt((char('.'), digit1)))))),
    ))
    .parse(input)
}

fn resolve_inheritance(raw: Vec<RawClone<'_>>) -> Result<RowClones, SyntaxRejection> {
    let multi = raw.len() > 1;
    let mut clones: RowClones = Vec::with_capacity(raw.len());

    for (i, clone) in raw.into_iter().enumerate() {
        let (sex, relationship, mut events) = match clone.head {
            Head::Sex(sex) => {
                let relationship = if i == 0 && multi {
                    CloneRelationship::Stemline
                } else {
                    CloneRelationship::Independent
                };
                (sex, relationship, Vec::new())
            }
            Head::Idem | Head::Sideline | Head::Subline(_) if clones.is_empty() => {
                return Err(SyntaxRejection::new(
                    0,
                    format!("'{}' has no earlier clone to refer to", clone.code),
                ));
            }
            Head::Idem => inherit(&clones[0], CloneRelationship::Idem),
            Head::Sideline => inherit(&clones[0], CloneRelationship::Sideline),
            Head::Subline(n) => {
                let parent = n
                    .map(|n| n as usize)
                    .filter(|&n| n < clones.len())
                    .unwrap_or(clones.len() - 1);
                inherit(&clones[parent], CloneRelationship::Subline)
            }
        };
        events.extend(clone.events);

        clones.push(CloneRecord {
            code: clone.code.to_string(),
            modal: clone.modal.0,
            modal_max: clone.modal.1,
            sex,
            relationship,
            events,
            cell_count: clone.cells.map(|(_, n)| n),
            composite: clone.cells.is_some_and(|(cp, _)| cp),
        });
    }

    Ok(clones)
}

fn inherit(
    parent: &CloneRecord,
    relationship: CloneRelationship,
) -> (String, CloneRelationship, Vec<Event>) {
    (parent.sex.clone(), relationship, parent.events.clone())
}

// ============================================================================
// Permissive re-lexing
// ============================================================================

fn scan_clone(clone: &str, base: usize, errors: &mut Vec<TokenError>) {
    let (body, cells) = split_cell_count(clone);
    let items = split_top_level(body, ',');
    let last = items.len().saturating_sub(1);
    let mut at = base;

    for (i, item) in items.iter().enumerate() {
        let span = SourceSpan::new(at, at + item.len().max(1));
        at += item.len() + 1;

        if item.is_empty() {
            let (code, message) = if i == last {
                (ErrorCode::UnexpectedEnd, "trailing separator")
            } else {
                (ErrorCode::UnexpectedChar, "empty event")
            };
            errors.push(TokenError::new(code, span, *item, message));
            continue;
        }

        match i {
            0 => {
                if !consumes(modal, item) {
                    errors.push(TokenError::new(
                        ErrorCode::InvalidModalNumber,
                        span,
                        *item,
                        "expected a chromosome count",
                    ));
                }
            }
            1 => {
                if !consumes(head, item) {
                    errors.push(TokenError::new(
                        ErrorCode::InvalidSexChromosomes,
                        span,
                        *item,
                        "expected sex chromosomes or idem/sl/sdl",
                    ));
                }
            }
            _ => {
                if !consumes(event, item) {
                    let (code, message) = classify_bad_event(item);
                    errors.push(TokenError::new(code, span, *item, message));
                }
            }
        }
    }

    if let Some(cells) = cells {
        if !consumes(cell_count, cells) {
            let start = base + body.len();
            errors.push(TokenError::new(
                ErrorCode::InvalidCellCount,
                SourceSpan::new(start, start + cells.len()),
                cells,
                "expected a cell count such as [20]",
            ));
        }
    }
}

fn consumes<'a, O>(
    mut parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
    item: &'a str,
) -> bool {
    matches!(parser(item), Ok((rest, _)) if rest.is_empty())
}

fn classify_bad_event(item: &str) -> (ErrorCode, &'static str) {
    let opens = item.matches('(').count();
    let closes = item.matches(')').count();
    if opens != closes {
        return (ErrorCode::UnbalancedParentheses, "unbalanced parentheses");
    }
    let unsigned = item.trim_start_matches(['+', '-']);
    if keyword(unsigned).is_ok_and(|(rest, _)| rest.starts_with('(')) {
        (ErrorCode::InvalidBand, "invalid chromosome or band group")
    } else {
        (ErrorCode::UnknownEvent, "unrecognized event")
    }
}

/// Split off a trailing `[...]` cell count.
fn split_cell_count(clone: &str) -> (&str, Option<&str>) {
    match clone.rfind('[') {
        Some(i) if !clone[i..].contains('(') => (&clone[..i], Some(&clone[i..])),
        _ => (clone, None),
    }
}

/// Split on a separator outside parentheses and brackets.
pub(crate) fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            c if c == separator && depth <= 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
