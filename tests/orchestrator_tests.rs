//! End-to-end interpretation tests
//!
//! Test categories:
//! - Fixture karyotypes: expected losses, gains and fusions per band
//! - Routing: which pipeline handles which notation
//! - Multi-clone karyotypes: splitting, cell counts and relationships
//! - Syntax failures: token errors and suggested rewrites

use ferro_iscn::error_handling::ErrorConfig;
use ferro_iscn::standard::CloneRelationship;
use ferro_iscn::{
    band_index, ErrorCode, IscnParser, KaryotypeInterpreter, Pipeline, StandardEventInterpreter,
};
use rstest::rstest;
use serde::Deserialize;
use std::fs;

// =============================================================================
// Fixture-based tests
// =============================================================================

#[derive(Debug, Deserialize)]
struct KaryotypeFixtures {
    karyotypes: Vec<KaryotypeCase>,
}

#[derive(Debug, Deserialize)]
struct KaryotypeCase {
    name: String,
    input: String,
    pipeline: String,
    #[serde(default)]
    cell_count: Option<u32>,
    loss: Vec<String>,
    not_lost: Vec<String>,
    gain: Vec<String>,
    #[serde(default)]
    gains_exact: bool,
    fusion: Vec<String>,
    #[serde(default)]
    fusion_count: Option<usize>,
}

fn load_fixtures() -> KaryotypeFixtures {
    let content = fs::read_to_string("tests/fixtures/karyotypes.json")
        .expect("Failed to read karyotypes.json");
    serde_json::from_str(&content).expect("Failed to parse karyotypes.json")
}

fn index_of(band: &str) -> usize {
    band_index()
        .resolve(band)
        .unwrap_or_else(|| panic!("band {} should resolve", band))
}

#[test]
fn test_fixture_karyotypes() {
    let interpreter = KaryotypeInterpreter::new();

    for case in load_fixtures().karyotypes {
        let report = interpreter
            .interpret(&case.input)
            .unwrap_or_else(|e| panic!("{}: {}", case.name, e));
        assert_eq!(report.len(), 1, "{}", case.name);

        let clone = &report.clones[0];
        assert_eq!(clone.pipeline.to_string(), case.pipeline, "{}", case.name);
        if case.cell_count.is_some() {
            assert_eq!(clone.cell_count, case.cell_count, "{}", case.name);
        }

        let outcome = clone.outcome.as_ref().expect("outcome should be decoded");
        for band in &case.loss {
            assert!(outcome.loss_at(index_of(band)) > 0, "{}: {} lost", case.name, band);
        }
        for band in &case.not_lost {
            assert_eq!(outcome.loss_at(index_of(band)), 0, "{}: {} kept", case.name, band);
        }
        for band in &case.gain {
            assert!(outcome.gain_at(index_of(band)) > 0, "{}: {} gained", case.name, band);
        }
        if case.gains_exact && case.gain.is_empty() {
            assert!(outcome.gained().is_empty(), "{}: no gains", case.name);
        }
        for band in &case.fusion {
            assert!(outcome.fusion_at(index_of(band)) > 0, "{}: {} fused", case.name, band);
        }
        if let Some(count) = case.fusion_count {
            assert_eq!(outcome.fused().len(), count, "{}: fusion count", case.name);
        }
    }
}

// =============================================================================
// Routing
// =============================================================================

#[rstest]
#[case("46,XX,del(5)(q13q31)", Pipeline::Standard)]
#[case("46,XX,der(9)t(9;17)(q11;q34)", Pipeline::Standard)]
#[case("46,XY,i(17q)", Pipeline::Standard)]
#[case("46,XX,der(7)(::7q11->7q31::)", Pipeline::Detailed)]
#[case("46,XX,r(3)(::3p21->3q12::)", Pipeline::Detailed)]
#[case("45,XX,dic(13;15)(13pter->13q10::15q10->15qter)", Pipeline::Detailed)]
#[case("47,XX,+8,der(7)(::7q11->7q31::)", Pipeline::Mixed)]
#[case("45,XX,-7,der(8)(8pter->8q21::hsr::8q24->8qter)", Pipeline::Mixed)]
fn test_pipeline_routing(#[case] input: &str, #[case] expected: Pipeline) {
    let report = KaryotypeInterpreter::new().interpret(input).unwrap();
    assert_eq!(report.clones[0].pipeline, expected, "routing of {}", input);
}

#[test]
fn test_mixed_merge_is_element_wise() {
    let interpreter = KaryotypeInterpreter::new();
    let standard = interpreter.interpret("46,XX,+7,del(5)(q13q31)").unwrap();
    let detailed = interpreter
        .interpret("46,XX,der(13)(13pter->13q10::15q21->15q31::13q14->13qter)")
        .unwrap();
    let mixed = interpreter
        .interpret("46,XX,+7,del(5)(q13q31),der(13)(13pter->13q10::15q21->15q31::13q14->13qter)")
        .unwrap();

    let s = standard.clones[0].outcome.as_ref().unwrap();
    let d = detailed.clones[0].outcome.as_ref().unwrap();
    let m = mixed.clones[0].outcome.as_ref().unwrap();
    for i in 0..band_index().len() {
        assert_eq!(m.loss_at(i), s.loss_at(i) + d.loss_at(i));
        assert_eq!(m.gain_at(i), s.gain_at(i) + d.gain_at(i));
        assert_eq!(m.fusion_at(i), s.fusion_at(i) + d.fusion_at(i));
    }
    assert_eq!(m.detailed_system, d.detailed_system);
}

#[test]
fn test_uncertain_marker_is_quoted_in_the_outcome() {
    let report = KaryotypeInterpreter::new().interpret("47,XX,+mar").unwrap();
    let outcome = report.clones[0].outcome.as_ref().unwrap();
    assert_eq!(outcome.uncertain_events.len(), 1);
    assert!(outcome.lost().is_empty());
}

#[test]
fn test_unknown_chromosome_is_a_validation_error() {
    let err = KaryotypeInterpreter::new().interpret("47,XX,+23").unwrap_err();
    assert!(err.is_validation());
    assert!(!err.is_syntax());
    assert_eq!(err.code(), Some(ErrorCode::UnknownChromosome));
}

// =============================================================================
// Multi-clone karyotypes
// =============================================================================

#[test]
fn test_multi_clone_standard() {
    let report = KaryotypeInterpreter::new()
        .interpret("47,XX,+8[10]/48,idem,+21[5]/46,XX[5]")
        .unwrap();
    assert_eq!(report.clone_codes(), vec!["47,XX,+8", "48,idem,+21", "46,XX"]);
    assert_eq!(report.cell_counts(), vec![Some(10), Some(5), Some(5)]);
    assert_eq!(
        report.relationships(),
        vec![
            CloneRelationship::Stemline,
            CloneRelationship::Idem,
            CloneRelationship::Independent
        ]
    );

    // idem inherits the stemline's +8
    let idem = report.outcomes()[1].unwrap();
    assert_eq!(idem.gain_at(index_of("8q24.3")), 1);
    assert_eq!(idem.gain_at(index_of("21q22.3")), 1);
}

#[test]
fn test_multi_clone_with_detailed_clone_is_split() {
    let report = KaryotypeInterpreter::new()
        .interpret("46,XX,der(7)(::7q11->7q31::)[10]/47,XX,+8[5]")
        .unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report.clones[0].pipeline, Pipeline::Detailed);
    assert_eq!(report.clones[1].pipeline, Pipeline::Standard);
    assert_eq!(report.cell_counts(), vec![Some(10), Some(5)]);

    let first = report.outcomes()[0].unwrap();
    let second = report.outcomes()[1].unwrap();
    assert_eq!(first.loss_at(index_of("7q36.3")), 1);
    assert_eq!(second.loss_at(index_of("7q36.3")), 0);
    assert_eq!(second.gain_at(index_of("8p23.3")), 1);
}

#[test]
fn test_split_clone_failure_propagates() {
    let err = KaryotypeInterpreter::new()
        .interpret("46,XX,der(7)(::7q11->7q31::)[10]/47,xx,+8[5]")
        .unwrap_err();
    let failure = err.syntax_failure().unwrap();
    assert_eq!(failure.input, "47,xx,+8");
    assert_eq!(
        failure.suggestion.as_deref(),
        Some("46,XX,der(7)(::7q11->7q31::)[10]/47,XX,+8[5]")
    );
}

// =============================================================================
// Syntax failures
// =============================================================================

#[rstest]
#[case("46,xx,del(5)(q13q31)", "46,XX,del(5)(q13q31)")]
#[case("46,XX,DEL(5)(q13q31)", "46,XX,del(5)(q13q31)")]
#[case("46,XY,t(9,22)(q34,q11)", "46,XY,t(9;22)(q34;q11)")]
#[case("46,XX,del(5)(q13q31", "46,XX,del(5)(q13q31)")]
#[case("47,XX,+8,", "47,XX,+8")]
#[case("46,XX[20", "46,XX[20]")]
#[case("45,XX,\u{2013}7", "45,XX,-7")]
fn test_syntax_failure_suggestion(#[case] input: &str, #[case] suggestion: &str) {
    let err = KaryotypeInterpreter::new().interpret(input).unwrap_err();
    assert!(err.is_syntax(), "{} should be a syntax failure", input);

    let failure = err.syntax_failure().unwrap();
    assert!(!failure.errors.is_empty(), "{} should carry token errors", input);
    assert_eq!(failure.suggestion.as_deref(), Some(suggestion));
    assert!(failure.report().contains(suggestion));
}

#[test]
fn test_token_errors_locate_the_offending_event() {
    let err = KaryotypeInterpreter::new()
        .interpret("46,XX,foo(5),del(5)(q13q31)")
        .unwrap_err();
    let failure = err.syntax_failure().unwrap();
    assert_eq!(failure.errors.len(), 1);
    assert_eq!(failure.errors[0].token, "foo(5)");
    assert_eq!(failure.errors[0].span.start, 6);
    assert_eq!(failure.errors[0].code, ErrorCode::UnknownEvent);
    assert_eq!(failure.suggestion, None);
}

#[test]
fn test_strict_cleaner_never_suggests() {
    let interpreter = KaryotypeInterpreter::with_components(
        IscnParser::new(),
        StandardEventInterpreter::default(),
        ErrorConfig::strict().cleaner(),
    );
    let err = interpreter.interpret("46,xx,del(5)(q13q31)").unwrap_err();
    let failure = err.syntax_failure().unwrap();
    assert!(!failure.errors.is_empty());
    assert_eq!(failure.suggestion, None);
}

#[test]
fn test_suggestion_is_not_interpreted() {
    // the rewrite parses, but the caller still gets the failure
    let result = KaryotypeInterpreter::new().interpret("47,xy,+8");
    assert!(result.is_err());
}

#[test]
fn test_report_serializes() {
    let report = KaryotypeInterpreter::new().interpret("47,XY,+8[12]").unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["normalized"], "47,XY,+8[12]");
    assert_eq!(json["clones"][0]["cell_count"], 12);
    assert_eq!(json["clones"][0]["pipeline"], "standard");
    assert_eq!(
        json["clones"][0]["outcome"]["gain"].as_array().unwrap().len(),
        band_index().len()
    );
}
