//! Detailed-system formula tests
//!
//! Test categories:
//! - Parsing: typed formulas and canonical display
//! - Interpretation: rings, dicentrics, HSR and foreign material
//! - Breakpoint clamping
//! - Outcome independence

use ferro_iscn::bands::band_index;
use ferro_iscn::detailed::{is_detailed_clause, Element, FormulaKind, Segment};
use ferro_iscn::{DetailedFormula, DetailedInterpreter};
use rstest::rstest;

fn at(name: &str) -> usize {
    band_index().resolve(name).unwrap()
}

// =============================================================================
// Parsing
// =============================================================================

#[rstest]
#[case("der(7)(::7q11->7q31::)", FormulaKind::Derivative, 1, true)]
#[case("dic(9;12)(9pter->9p12::12p13->12qter)", FormulaKind::Dicentric, 2, false)]
#[case("r(3)(::3p21->3q12::)", FormulaKind::Ring, 1, true)]
#[case("der(1;3;7)(1pter->1q21::3q21->3qter)", FormulaKind::Derivative, 3, false)]
fn test_parse_shape(
    #[case] clause: &str,
    #[case] kind: FormulaKind,
    #[case] bases: usize,
    #[case] ring: bool,
) {
    let formula = DetailedFormula::parse(clause).unwrap();
    assert_eq!(formula.kind, kind);
    assert_eq!(formula.base_chromosomes.len(), bases);
    assert_eq!(formula.ring, ring);
}

#[test]
fn test_parse_elements_in_order() {
    let formula = DetailedFormula::parse("der(8)(8pter->8q21:: hsr ::8q24::8q24->8qter)").unwrap();
    assert_eq!(
        formula.elements,
        vec![
            Element::Segment(Segment::new("8pter", "8q21")),
            Element::Hsr,
            Element::Breakpoint("8q24".to_string()),
            Element::Segment(Segment::new("8q24", "8qter")),
        ]
    );
}

#[rstest]
#[case("der(9)t(9;17)(q11;q34)")]
#[case("del(5)(q13q31)")]
#[case("der(7)(7pter)")]
#[case("der(7)(::7q11->7q31::")]
#[case("")]
fn test_not_detailed(#[case] clause: &str) {
    assert!(DetailedFormula::parse(clause).is_none());
    assert!(!is_detailed_clause(clause));
}

#[test]
fn test_display_is_canonical() {
    let formula = DetailedFormula::parse("DIC(9;12)(9PTER->9p12::12P13->12qter)").unwrap();
    assert_eq!(formula.to_string(), "dic(9;12)(9pter->9p12::12p13->12qter)");
}

// =============================================================================
// Interpretation
// =============================================================================

#[test]
fn test_ring_keeps_only_the_joined_segment() {
    let outcome = DetailedInterpreter::default().interpret_clause("der(7)(::7q11->7q31::)");
    for lost in ["7p22.3", "7p10", "7q32.1", "7q36.3"] {
        assert_eq!(outcome.loss_at(at(lost)), 1, "{}", lost);
    }
    assert_eq!(outcome.loss_at(at("7q21.11")), 0);
    assert!(outcome.gained().is_empty());
    assert_eq!(outcome.fused(), vec![at("7q11.1"), at("7q31.1")]);
}

#[test]
fn test_dicentric_credits_each_base() {
    let outcome =
        DetailedInterpreter::default().interpret_clause("dic(9;12)(9pter->9p12::12p13->12qter)");
    for lost in ["9q11", "9q34.3", "12p13.33", "12p13.1"] {
        assert_eq!(outcome.loss_at(at(lost)), 1, "{}", lost);
    }
    for kept in ["9p24.3", "9p13.1", "12p12.1", "12q24.33"] {
        assert_eq!(outcome.loss_at(at(kept)), 0, "{}", kept);
    }
    assert!(outcome.gained().is_empty());
    assert_eq!(outcome.fusion_at(at("9p12")), 1);
    assert_eq!(outcome.fusion_at(at("12p13.1")), 1);
}

#[test]
fn test_robertsonian_dicentric() {
    let outcome =
        DetailedInterpreter::default().interpret_clause("der(13;15)(13pter->13q10::15q10->15q21)");
    for lost in ["13q11", "13q34", "15p13", "15q22.1", "15q26.3"] {
        assert_eq!(outcome.loss_at(at(lost)), 1, "{}", lost);
    }
    assert_eq!(outcome.loss_at(at("13p13")), 0);
    assert_eq!(outcome.loss_at(at("15q15.3")), 0);
    assert!(outcome.gained().is_empty());
}

#[test]
fn test_hsr_is_transparent() {
    let with_hsr =
        DetailedInterpreter::default().interpret_clause("der(8)(8pter->8q21::hsr::8q24->8qter)");
    let without =
        DetailedInterpreter::default().interpret_clause("der(8)(8pter->8q21::8q24->8qter)");
    assert_eq!(with_hsr.loss, without.loss);
    assert_eq!(with_hsr.gain, without.gain);
    assert_eq!(with_hsr.fusion, without.fusion);
    assert_eq!(with_hsr.loss_at(at("8q22.1")), 1);
    assert_eq!(with_hsr.fused().len(), 2);
}

#[test]
fn test_contiguous_native_segments_have_no_gap() {
    let outcome =
        DetailedInterpreter::default().interpret_clause("der(1)(1pter->1q21::1q21->1qter)");
    assert!(outcome.lost().is_empty());
    assert_eq!(outcome.fusion_at(at("1q21.1")), 2);
}

#[test]
fn test_native_segments_are_sorted_before_gap_analysis() {
    let outcome = DetailedInterpreter::default()
        .interpret_clause("der(13)(13q14->13qter::13pter->13q10)");
    assert_eq!(outcome.loss_at(at("13q12.11")), 1);
    assert_eq!(outcome.loss_at(at("13q34")), 0);
    assert_eq!(outcome.loss_at(at("13p13")), 0);
}

#[test]
fn test_foreign_segment_gains_whole_extent() {
    let outcome =
        DetailedInterpreter::default().interpret_clause("der(9)(9pter->9q34::22q11->22qter)");
    for gained in ["22q11.1", "22q12.1", "22q13.33"] {
        assert_eq!(outcome.gain_at(at(gained)), 1, "{}", gained);
    }
    assert_eq!(outcome.gain_at(at("22p13")), 0);
    assert_eq!(outcome.fusion_at(at("22q11.1")), 1);
    assert_eq!(outcome.fusion_at(at("9q34.11")), 1);
    assert_eq!(outcome.detailed_system, vec!["der(9)(9pter->9q34::22q11->22qter)"]);
}

#[test]
fn test_malformed_clause_yields_zero_outcome() {
    let outcome = DetailedInterpreter::default().interpret_clause("der(7)(7pter");
    assert!(outcome.is_neutral());
    assert_eq!(outcome.len(), band_index().len());
}

#[test]
fn test_malformed_segment_is_skipped() {
    let outcome =
        DetailedInterpreter::default().interpret_clause("der(1)(1pter->1q21->1q32::5q31->5qter)");
    assert_eq!(outcome.gain_at(at("5q35.3")), 1);
    // No native segment survives, so all of chromosome 1 counts as lost
    assert_eq!(outcome.loss_at(at("1q21.1")), 1);
}

// =============================================================================
// Breakpoint clamping
// =============================================================================

#[test]
fn test_clamping_toggles_out_of_range_gain() {
    let clause = "der(13)(13pter->13q10::15q21->15q31::13q14->13qter)";
    let clamped = DetailedInterpreter::default().interpret_clause(clause);
    assert_eq!(clamped.gain_at(at("15q22.1")), 1);
    assert_eq!(clamped.gain_at(at("15q26.3")), 1);

    let literal = DetailedInterpreter::new(band_index())
        .with_breakpoint_clamping(false)
        .interpret_clause(clause);
    assert_eq!(literal.gain_at(at("15q22.1")), 0);
    assert_eq!(literal.loss_at(at("13q13.3")), 1);
}

// =============================================================================
// Outcome independence
// =============================================================================

#[test]
fn test_each_call_allocates_fresh_vectors() {
    let interpreter = DetailedInterpreter::default();
    let a = interpreter.interpret_clause("der(7)(::7q11->7q31::)");
    let b = interpreter.interpret_clause("der(7)(::7q11->7q31::)");
    assert_eq!(a, b);
    assert_ne!(a.loss.as_ptr(), b.loss.as_ptr());
    assert_ne!(a.gain.as_ptr(), b.gain.as_ptr());
    assert_ne!(a.fusion.as_ptr(), b.fusion.as_ptr());
}
