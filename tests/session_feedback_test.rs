//! Integration tests for session snapshots, feedback persistence and audit
//! logging across engine instances

use deidentifier::deidentify::{
    AuditConfig, DeidentificationEngine, DetectionConfig, FeedbackStore, PiiType,
    ProcessOptions, Session,
};
use tempfile::tempdir;

#[test]
fn test_session_reverses_in_new_engine() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");

    let input = "Ship to 42 Baker Street, call 555-867-5309";
    let options = ProcessOptions::default();
    let mut engine = DeidentificationEngine::with_defaults().unwrap();
    let result = engine.process_text_with(input, &options).unwrap();
    Session::from_result(input, &result, &options).save(&path).unwrap();
    drop(engine);

    let session = Session::load(&path).unwrap();
    assert_eq!(session.input_text, input);
    assert_eq!(session.detected_pii.len(), result.detected_pii.len());

    let mut restored = DeidentificationEngine::with_defaults().unwrap();
    session.restore_engine(&mut restored);
    assert_eq!(restored.reverse_text(&session.output_text), input);
}

#[test]
fn test_restored_session_continues_numbering() {
    let mut first = DeidentificationEngine::with_defaults().unwrap();
    let earlier = first.process_text("a@example.org").unwrap();

    let mut second = DeidentificationEngine::with_defaults().unwrap();
    second.restore_mappings(earlier.mappings.clone());

    let result = second
        .process_text("a@example.org and b@example.org")
        .unwrap();
    assert_eq!(result.processed_text, "[EMAIL_1_95%] and [EMAIL_2_95%]");
}

#[test]
fn test_feedback_file_applies_to_later_runs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("feedback.json");

    let mut store = FeedbackStore::new();
    store.add("Grace Hopper", PiiType::Name, false);
    store.save(&path).unwrap();

    let loaded = FeedbackStore::load(&path).unwrap();
    let mut engine = DeidentificationEngine::with_defaults()
        .unwrap()
        .with_feedback(loaded);

    let result = engine
        .process_text("notes from grace: Grace Hopper approved")
        .unwrap();
    assert!(result.processed_text.contains("Grace Hopper"));
    assert!(result
        .detected_pii
        .iter()
        .all(|d| d.original != "Grace Hopper"));
}

#[test]
fn test_audit_log_hashes_values() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("audit").join("deidentifier.log");

    let config = DetectionConfig {
        audit: AuditConfig {
            enabled: true,
            log_path: log_path.clone(),
            json_format: true,
        },
        ..Default::default()
    };
    let mut engine = DeidentificationEngine::new(&config).unwrap();
    engine.process_text("write to secret@example.com").unwrap();
    engine.process_text("and 555-123-4567").unwrap();

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(!contents.contains("secret@example.com"));
    assert!(!contents.contains("555-123-4567"));

    let entry: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(entry["detections_count"], 1);
    assert_eq!(entry["detections"][0]["type"], "EMAIL");
    assert_eq!(
        entry["detections"][0]["value_hash"].as_str().unwrap().len(),
        64
    );
}
