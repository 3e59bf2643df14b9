//! Integration tests for the deidentification engine public API

use deidentifier::deidentify::{
    DeidentificationEngine, DetectionConfig, DetectionMethod, PiiType, ProcessOptions,
};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use test_case::test_case;

const INTRO: &str =
    "Hi, I'm Jane Doe. Email me at jane.doe@example.com or call 555-123-4567.";

fn engine() -> DeidentificationEngine {
    DeidentificationEngine::with_defaults().expect("default engine")
}

fn placeholders(text: &str) -> HashSet<String> {
    let re = Regex::new(r"\[[A-Z_]+_\d+(?:_\d+%)?\]").unwrap();
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

#[test]
fn test_intro_scenario() {
    let mut engine = engine();
    let result = engine
        .process_text_with(INTRO, &ProcessOptions::default())
        .unwrap();

    assert!(result.total_detections >= 3);
    let types: HashSet<_> = result.detected_pii.iter().map(|d| d.pii_type.clone()).collect();
    assert!(types.contains(&PiiType::Email));
    assert!(types.contains(&PiiType::Phone));
    assert!(types.contains(&PiiType::Name));

    assert!(!result.processed_text.contains("jane.doe@example.com"));
    assert!(!result.processed_text.contains("555-123-4567"));
    assert!(!result.processed_text.contains("Jane Doe"));
    assert!(placeholders(&result.processed_text).len() >= 3);
}

#[test]
fn test_round_trip() {
    let mut engine = engine();
    let input = "Card 4111111111111111, SSN 123-45-6789, host 192.168.1.20";
    let result = engine.process_text(input).unwrap();

    let types: HashSet<_> = result.detected_pii.iter().map(|d| d.pii_type.clone()).collect();
    assert!(types.contains(&PiiType::CreditCard));
    assert!(types.contains(&PiiType::Ssn));
    assert!(types.contains(&PiiType::IpAddress));

    assert_eq!(engine.reverse_text(&result.processed_text), input);
    assert_eq!(engine.reverse_text(INTRO), INTRO);
}

#[test]
fn test_intro_round_trip() {
    let mut engine = engine();
    let result = engine.process_text(INTRO).unwrap();
    assert_eq!(engine.reverse_text(&result.processed_text), INTRO);
}

#[test]
fn test_stable_remapping_across_calls() {
    let mut engine = engine();

    let first = engine
        .process_text("bob@example.com wrote; bob@example.com again")
        .unwrap();
    assert_eq!(first.mappings.len(), 1);
    assert_eq!(
        first.processed_text,
        "[EMAIL_1_95%] wrote; [EMAIL_1_95%] again"
    );

    let second = engine
        .process_text("cc bob@example.com and eve@example.com")
        .unwrap();
    assert_eq!(
        second.processed_text,
        "cc [EMAIL_1_95%] and [EMAIL_2_95%]"
    );
    assert_eq!(engine.mappings().len(), 2);
}

#[test]
fn test_placeholder_uniqueness() {
    let mut engine = engine();
    let result = engine
        .process_text(
            "Ann Lee (ann@example.com, 555-222-3333) met Bob Ray (bob@example.com, 555-444-5555)",
        )
        .unwrap();

    let mut by_replacement: HashMap<&str, &str> = HashMap::new();
    for detection in &result.detected_pii {
        if let Some(previous) =
            by_replacement.insert(&detection.replacement, &detection.original)
        {
            assert_eq!(previous, detection.original);
        }
    }
    assert!(by_replacement.len() >= 4);
}

#[test]
fn test_detections_sorted_by_confidence() {
    let mut engine = engine();
    let result = engine
        .process_text("Employee ID: EMP12345 works at Globex Corporation. Diagnosis: asthma")
        .unwrap();

    assert!(result.ml_detections_count > 0);
    for pair in result.detected_pii.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
    let heuristic = result
        .detected_pii
        .iter()
        .filter(|d| d.method != DetectionMethod::Regex)
        .count();
    assert_eq!(heuristic, result.ml_detections_count);
}

#[test_case(0.5, 0.8 ; "low to high")]
#[test_case(0.7, 0.9 ; "default to strict")]
#[test_case(0.0, 1.0 ; "full range")]
fn test_threshold_monotonicity(low: f64, high: f64) {
    let input = "Mr. Smith from Initech Inc reported ID AB1234567. Diagnosis: migraine. \
                 Contact Mary Jones at mary@example.org";

    let run = |threshold: f64| {
        let mut engine = engine();
        let options = ProcessOptions {
            ml_enabled: true,
            confidence_threshold: threshold,
        };
        engine.process_text_with(input, &options).unwrap().total_detections
    };

    assert!(run(high) <= run(low));
}

#[test]
fn test_luhn_gates_credit_cards() {
    let mut engine = engine();

    let valid = engine.process_text("card 4111111111111111").unwrap();
    let card = valid
        .detected_pii
        .iter()
        .find(|d| d.pii_type == PiiType::CreditCard)
        .expect("valid card detected");
    assert_eq!(card.original, "4111111111111111");
    assert_eq!(card.confidence, 0.95);

    let invalid = engine.process_text("card 4111111111111112").unwrap();
    assert!(invalid
        .detected_pii
        .iter()
        .all(|d| d.pii_type != PiiType::CreditCard));
}

#[test]
fn test_feedback_suppresses_pattern_and_heuristic_names() {
    let mut engine = engine();
    engine.add_feedback("John Smith", "NAME", false);

    let result = engine
        .process_text("Please contact John Smith tomorrow")
        .unwrap();

    assert!(result
        .detected_pii
        .iter()
        .all(|d| !(d.pii_type == PiiType::Name && d.original == "John Smith")));
    assert!(result.processed_text.contains("John Smith"));
}

#[test]
fn test_feedback_is_per_type() {
    let mut engine = engine();
    engine.add_feedback("John Smith", "ORGANIZATION", false);

    let result = engine.process_text("Please contact John Smith").unwrap();
    assert!(!result.processed_text.contains("John Smith"));
}

#[test]
fn test_empty_input_yields_empty_result() {
    let mut engine = engine();
    let result = engine.process_text("").unwrap();
    assert_eq!(result.processed_text, "");
    assert!(result.detected_pii.is_empty());
    assert!(result.mappings.is_empty());
    assert_eq!(result.total_detections, 0);
    assert_eq!(result.ml_detections_count, 0);
}

#[test]
fn test_reprocessing_output_is_idempotent() {
    let mut engine = engine();
    let first = engine
        .process_text("mail a@example.org, ssn 123-45-6789")
        .unwrap();
    assert_eq!(first.processed_text, "mail [EMAIL_1_95%], ssn [SSN_1_95%]");

    let second = engine.process_text(&first.processed_text).unwrap();
    assert_eq!(second.processed_text, first.processed_text);
    assert_eq!(second.total_detections, 0);
}

#[test_case(INTRO ; "intro with contact phrase")]
#[test_case("My address is 12 Harbour Lane, Springfield" ; "address phrase")]
fn test_reprocessing_leaves_placeholders_after_phrases(input: &str) {
    let mut engine = engine();
    let first = engine.process_text(input).unwrap();
    assert!(first.total_detections > 0);

    let second = engine.process_text(&first.processed_text).unwrap();
    assert_eq!(second.processed_text, first.processed_text);
    assert!(second
        .detected_pii
        .iter()
        .all(|d| !d.original.contains('[')));
    assert_eq!(engine.reverse_text(&second.processed_text), input);
}

#[test]
fn test_reverse_without_placeholders_is_noop() {
    let engine = engine();
    assert_eq!(engine.reverse_text("nothing to see"), "nothing to see");
}

#[test]
fn test_reset_clears_state_but_keeps_feedback() {
    let mut engine = engine();
    engine.add_feedback("Acme Widget", "NAME", false);
    engine.process_text("a@example.org b@example.org").unwrap();
    assert_eq!(engine.mappings().len(), 2);

    engine.reset();
    assert!(engine.mappings().is_empty());
    assert!(engine.feedback().is_rejected("acme widget", &PiiType::Name));

    let result = engine.process_text("c@example.org").unwrap();
    assert_eq!(result.processed_text, "[EMAIL_1_95%]");
}

#[test]
fn test_disabled_patterns_and_plain_placeholders() {
    let config = DetectionConfig {
        disabled_patterns: vec!["NAME".to_string()],
        placeholder_confidence: false,
        ml_enabled: false,
        ..Default::default()
    };
    let mut engine = DeidentificationEngine::new(&config).unwrap();
    let result = engine
        .process_text("Jane Doe uses jane@example.com")
        .unwrap();
    assert_eq!(result.processed_text, "Jane Doe uses [EMAIL_1]");
}
