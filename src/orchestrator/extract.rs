//! Detailed clause extraction
//!
//! Scans a karyotype left to right for `der(`, `dic(` and `r(` clauses, the
//! last only at the start of an event so that the tail of `der(` or `qdp(`
//! never counts. A clause is the keyword, its base-chromosome group and, when one follows
//! directly, a second group. Only clauses whose text contains `->` or `::`
//! are extracted; everything else stays in the residue, so ordinary syntax
//! such as `der(9)t(9;17)(q11;q34)` is left alone.

use crate::detailed::formula::{has_detailed_body, parenthesized};

/// Detailed clauses and the text left once they are removed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    /// Clauses in written order, each with its `+`/`-` sign if it had one
    pub clauses: Vec<String>,
    /// Remaining text, with dangling separators tidied
    pub residue: String,
}

/// Pull every detailed clause out of the text.
pub fn extract_detailed(text: &str) -> Extraction {
    let mut clauses = Vec::new();
    let mut residue = String::with_capacity(text.len());
    let mut pos = 0;

    while pos < text.len() {
        if let Some(len) = candidate_len(text, pos) {
            let candidate = &text[pos..pos + len];
            if has_detailed_body(candidate) {
                // a sign belongs to the clause, not the residue
                let sign = if residue.ends_with(['+', '-']) {
                    residue.pop()
                } else {
                    None
                };
                clauses.push(match sign {
                    Some(sign) => format!("{}{}", sign, candidate),
                    None => candidate.to_string(),
                });
            } else {
                residue.push_str(candidate);
            }
            pos += len;
            continue;
        }
        let Some(c) = text[pos..].chars().next() else {
            break;
        };
        residue.push(c);
        pos += c.len_utf8();
    }

    Extraction {
        clauses,
        residue: tidy(&residue),
    }
}

/// Split a multi-clone karyotype on `]/`.
///
/// Returns each clone's text with its trailing cell count removed, paired
/// with the count.
pub fn split_clones(text: &str) -> Vec<(&str, Option<u32>)> {
    text.split("]/").map(split_cell_count).collect()
}

/// Strip a trailing `[N]`, `[cpN]` or unterminated `[N`.
pub fn split_cell_count(clone: &str) -> (&str, Option<u32>) {
    let Some(open) = clone.rfind('[') else {
        return (clone, None);
    };
    let inner = clone[open + 1..].trim_end_matches(']');
    let digits = inner.strip_prefix("cp").unwrap_or(inner);
    match digits.parse() {
        Ok(count) => (&clone[..open], Some(count)),
        Err(_) => (clone, None),
    }
}

/// Length of the clause starting at `pos`, if a keyword starts there.
fn candidate_len(text: &str, pos: usize) -> Option<usize> {
    let rest = &text[pos..];
    let keyword = if rest.starts_with("der(") || rest.starts_with("dic(") {
        3
    } else if rest.starts_with("r(") && (pos == 0 || text[..pos].ends_with([',', '+', '-'])) {
        1
    } else {
        return None;
    };

    let (after_base, _) = parenthesized(&rest[keyword..]).ok()?;
    let after = match parenthesized(after_base) {
        Ok((after_body, _)) => after_body,
        Err(_) => after_base,
    };
    Some(rest.len() - after.len())
}

fn tidy(residue: &str) -> String {
    let mut out = residue.to_string();
    while out.contains(",,") {
        out = out.replace(",,", ",");
    }
    out = out.replace(",[", "[");
    out.trim_end_matches(',').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_clause() {
        let extraction = extract_detailed("46,XX,der(7)(::7q11->7q31::)");
        assert_eq!(extraction.clauses, vec!["der(7)(::7q11->7q31::)"]);
        assert_eq!(extraction.residue, "46,XX");
    }

    #[test]
    fn test_extract_keeps_residue_events() {
        let extraction = extract_detailed(
            "46,XX,+7,der(13)(13pter->13q10::15q21->15q31::13q14->13qter),del(5)(q13q31)[10]",
        );
        assert_eq!(
            extraction.clauses,
            vec!["der(13)(13pter->13q10::15q21->15q31::13q14->13qter)"]
        );
        assert_eq!(extraction.residue, "46,XX,+7,del(5)(q13q31)[10]");
    }

    #[test]
    fn test_extract_cell_count_after_clause() {
        let extraction = extract_detailed("46,XX,der(8)(8pter->8q21::hsr::8q24->8qter)[12]");
        assert_eq!(extraction.residue, "46,XX[12]");
    }

    #[test]
    fn test_standard_derivative_untouched() {
        let text = "46,XX,der(9)t(9;17)(q11;q34)";
        let extraction = extract_detailed(text);
        assert!(extraction.clauses.is_empty());
        assert_eq!(extraction.residue, text);
    }

    #[test]
    fn test_ring_requires_separator() {
        let extraction = extract_detailed("47,XX,+r(3)(::3p21->3q12::)");
        assert_eq!(extraction.clauses, vec!["+r(3)(::3p21->3q12::)"]);
        assert_eq!(extraction.residue, "47,XX");

        let extraction = extract_detailed("46,XY,r(3)(::3p21->3q12::)");
        assert_eq!(extraction.clauses, vec!["r(3)(::3p21->3q12::)"]);

        let extraction = extract_detailed("46,XX,qdp(1)(q21q32)");
        assert!(extraction.clauses.is_empty());
    }

    #[test]
    fn test_multiple_clauses() {
        let extraction = extract_detailed(
            "45,XX,dic(13;15)(13pter->13q10::15q10->15qter),der(7)(::7q11->7q31::)",
        );
        assert_eq!(extraction.clauses.len(), 2);
        assert_eq!(extraction.residue, "45,XX");
    }

    #[test]
    fn test_split_clones() {
        let clones = split_clones("46,XX,der(7)(::7q11->7q31::)[10]/47,XX,+8[cp5]");
        assert_eq!(
            clones,
            vec![("46,XX,der(7)(::7q11->7q31::)", Some(10)), ("47,XX,+8", Some(5))]
        );
    }

    #[test]
    fn test_split_cell_count_without_count() {
        assert_eq!(split_cell_count("46,XX"), ("46,XX", None));
        assert_eq!(split_cell_count("46,XX[abc]"), ("46,XX[abc]", None));
    }
}
