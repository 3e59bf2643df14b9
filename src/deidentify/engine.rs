//! Deidentification engine
//!
//! Orchestrates the two detection phases over one input:
//!
//! 1. Every catalog pattern, in declaration order, rewrites the working text
//!    in place. Later patterns see earlier placeholders, never the raw PII.
//! 2. Heuristic detectors read the original text. Surviving candidates are
//!    re-applied to the phase 1 output as case-insensitive, word-bounded
//!    literals; a candidate no longer present there is skipped and left out
//!    of the report.
//!
//! Counters and mappings persist across calls until [`DeidentificationEngine::reset`].
//! Feedback survives a reset.

use crate::deidentify::audit::{AuditLogger, RunSummary};
use crate::deidentify::catalog::PatternCatalog;
use crate::deidentify::config::DetectionConfig;
use crate::deidentify::feedback::FeedbackStore;
use crate::deidentify::filter::CandidateFilter;
use crate::deidentify::heuristics::HeuristicDetectors;
use crate::deidentify::mapping::MappingStore;
use crate::deidentify::models::{
    normalize, Detection, DetectionMethod, PiiType, ProcessOptions, ProcessResult,
};
use crate::deidentify::placeholder::PlaceholderAllocator;
use crate::domain::{DeidError, Result};
use chrono::Utc;
use regex::{NoExpand, RegexBuilder};
use std::collections::{BTreeMap, HashSet};
use std::time::Instant;
use uuid::Uuid;

/// Confidence assigned to every catalog match
pub const PATTERN_CONFIDENCE: f64 = 0.95;

/// Detection and substitution engine
pub struct DeidentificationEngine {
    catalog: PatternCatalog,
    heuristics: HeuristicDetectors,
    allocator: PlaceholderAllocator,
    mappings: MappingStore,
    feedback: FeedbackStore,
    options: ProcessOptions,
    max_input_chars: usize,
    audit_logger: Option<AuditLogger>,
}

impl DeidentificationEngine {
    /// Create an engine from configuration
    pub fn new(config: &DetectionConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| DeidError::Configuration(format!("{e:#}")))?;

        let catalog = match config.pattern_library {
            Some(ref path) => PatternCatalog::from_file(path),
            None => PatternCatalog::default_patterns(),
        }
        .map_err(|e| DeidError::Pattern(format!("{e:#}")))?
        .without_labels(&config.disabled_patterns);

        let audit_logger = if config.audit.enabled {
            Some(
                AuditLogger::new(
                    config.audit.log_path.clone(),
                    config.audit.json_format,
                    config.audit.enabled,
                )
                .map_err(|e| DeidError::Configuration(format!("{e:#}")))?,
            )
        } else {
            None
        };

        tracing::debug!(
            patterns = catalog.patterns().len(),
            ml_enabled = config.ml_enabled,
            threshold = config.confidence_threshold,
            audit = audit_logger.is_some(),
            "Deidentification engine initialized"
        );

        Ok(Self {
            catalog,
            heuristics: HeuristicDetectors::new(),
            allocator: PlaceholderAllocator::new(config.placeholder_confidence),
            mappings: MappingStore::new(),
            feedback: FeedbackStore::new(),
            options: config.process_options(),
            max_input_chars: config.max_input_chars,
            audit_logger,
        })
    }

    /// Engine with the built-in catalog and default settings
    pub fn with_defaults() -> Result<Self> {
        Self::new(&DetectionConfig::default())
    }

    /// Replace the heuristic detector set
    pub fn with_heuristics(mut self, heuristics: HeuristicDetectors) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Replace the feedback store
    pub fn with_feedback(mut self, feedback: FeedbackStore) -> Self {
        self.feedback = feedback;
        self
    }

    /// Process text with the engine's current options
    pub fn process_text(&mut self, text: &str) -> Result<ProcessResult> {
        let options = self.options;
        self.process_text_with(text, &options)
    }

    /// Process text with explicit per-call options
    pub fn process_text_with(
        &mut self,
        text: &str,
        options: &ProcessOptions,
    ) -> Result<ProcessResult> {
        let input_chars = text.chars().count();
        if input_chars > self.max_input_chars {
            return Err(DeidError::InputTooLarge {
                len: input_chars,
                max: self.max_input_chars,
            });
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();
        crate::log_process_start!(run_id, input_chars);

        if text.is_empty() {
            return Ok(ProcessResult::empty(self.mappings.snapshot()));
        }

        let mut detections = Vec::new();
        let mut consumed = HashSet::new();

        let mut working = self.apply_patterns(text, &mut detections, &mut consumed);
        tracing::debug!(
            run_id = %run_id,
            detections = detections.len(),
            "Pattern phase complete"
        );

        if options.ml_enabled {
            working = self.apply_heuristics(text, working, options, &consumed, &mut detections);
        }

        let result = ProcessResult::new(working, detections, self.mappings.snapshot());
        let processing_time_ms = start.elapsed().as_millis() as u64;

        if let Some(ref logger) = self.audit_logger {
            let summary = RunSummary {
                run_id,
                started_at,
                input_chars,
                processing_time_ms,
                options,
                result: &result,
            };
            if let Err(e) = logger.log_run(&summary) {
                tracing::warn!(run_id = %run_id, error = %e, "Failed to write audit entry");
            }
        }

        crate::log_process_complete!(
            run_id,
            result.total_detections,
            result.ml_detections_count,
            processing_time_ms
        );

        Ok(result)
    }

    /// Phase 1: substitute catalog matches into a working copy of `text`
    fn apply_patterns(
        &mut self,
        text: &str,
        detections: &mut Vec<Detection>,
        consumed: &mut HashSet<String>,
    ) -> String {
        let mut working = text.to_string();
        let mut reported: HashSet<String> = HashSet::new();

        for pattern in self.catalog.patterns() {
            let mut output = String::with_capacity(working.len());
            let mut last = 0;
            let mut replaced = 0usize;

            for m in pattern.matches(&working) {
                output.push_str(&working[last..m.start]);
                last = m.end;

                if self.feedback.is_rejected(m.text, &m.pii_type) {
                    output.push_str(m.text);
                    continue;
                }

                let placeholder = placeholder_for(
                    &mut self.allocator,
                    &mut self.mappings,
                    m.text,
                    &m.pii_type,
                    PATTERN_CONFIDENCE,
                );
                output.push_str(&placeholder);
                replaced += 1;

                consumed.insert(normalize(m.text));
                if reported.insert(m.text.to_string()) {
                    let mut detection = Detection::new(
                        m.pii_type.clone(),
                        m.text,
                        PATTERN_CONFIDENCE,
                        DetectionMethod::Regex,
                    );
                    detection.replacement = placeholder;
                    detections.push(detection);
                }
            }

            output.push_str(&working[last..]);
            if replaced > 0 {
                tracing::trace!(pattern = %pattern.name, replaced, "Pattern applied");
            }
            working = output;
        }

        working
    }

    /// Phase 2: score heuristic candidates on `original` and apply the
    /// survivors to `working`
    fn apply_heuristics(
        &mut self,
        original: &str,
        mut working: String,
        options: &ProcessOptions,
        consumed: &HashSet<String>,
        detections: &mut Vec<Detection>,
    ) -> String {
        let candidates = self.heuristics.detect(original);
        let accepted = CandidateFilter::new(options.confidence_threshold).apply(
            candidates,
            consumed,
            &self.feedback,
        );

        for mut candidate in accepted {
            let pattern = match RegexBuilder::new(&literal_pattern(&candidate.original))
                .case_insensitive(true)
                .build()
            {
                Ok(pattern) => pattern,
                Err(e) => {
                    tracing::warn!(
                        pii_type = %candidate.pii_type,
                        error = %e,
                        "Skipping candidate that cannot be re-matched"
                    );
                    continue;
                }
            };

            if !pattern.is_match(&working) {
                tracing::trace!(
                    pii_type = %candidate.pii_type,
                    method = candidate.method.as_str(),
                    "Candidate no longer present after pattern phase"
                );
                continue;
            }

            let placeholder = placeholder_for(
                &mut self.allocator,
                &mut self.mappings,
                &candidate.original,
                &candidate.pii_type,
                candidate.confidence,
            );
            working = pattern
                .replace_all(&working, NoExpand(&placeholder))
                .into_owned();
            candidate.replacement = placeholder;
            detections.push(candidate);
        }

        working
    }

    /// Clear counters and mappings; feedback is kept
    pub fn reset(&mut self) {
        self.allocator.reset();
        self.mappings.reset();
        tracing::debug!("Engine state reset");
    }

    /// Restore originals in a deidentified text
    pub fn reverse_text(&self, text: &str) -> String {
        self.mappings.reverse(text)
    }

    /// Record reviewer feedback for a (text, type) pair
    pub fn add_feedback(&mut self, text: &str, pii_type: &str, is_correct: bool) {
        let pii_type = PiiType::from(pii_type);
        tracing::debug!(pii_type = %pii_type, is_correct, "Feedback recorded");
        self.feedback.add(text, pii_type, is_correct);
    }

    /// Snapshot of the `original -> placeholder` table
    pub fn mappings(&self) -> BTreeMap<String, String> {
        self.mappings.snapshot()
    }

    /// Load a saved `original -> placeholder` table
    ///
    /// Counters advance past every restored placeholder so later
    /// allocations cannot collide with them.
    pub fn restore_mappings(&mut self, mappings: BTreeMap<String, String>) {
        for placeholder in mappings.values() {
            self.allocator.observe(placeholder);
        }
        for (original, placeholder) in mappings {
            self.mappings.insert(original, placeholder);
        }
    }

    pub fn feedback(&self) -> &FeedbackStore {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut FeedbackStore {
        &mut self.feedback
    }

    pub fn options(&self) -> ProcessOptions {
        self.options
    }

    pub fn set_ml_enabled(&mut self, enabled: bool) {
        self.options.ml_enabled = enabled;
    }

    pub fn set_confidence_threshold(&mut self, threshold: f64) {
        self.options.confidence_threshold = threshold.clamp(0.0, 1.0);
    }

    /// The pattern catalog in use
    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }
}

/// Escaped literal with `\b` on each side that starts or ends in a word
/// character
fn literal_pattern(literal: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if literal.starts_with(is_word) { r"\b" } else { "" };
    let trail = if literal.ends_with(is_word) { r"\b" } else { "" };
    format!("{lead}{}{trail}", regex::escape(literal))
}

/// Existing placeholder for `original`, or a newly allocated one
fn placeholder_for(
    allocator: &mut PlaceholderAllocator,
    mappings: &mut MappingStore,
    original: &str,
    pii_type: &PiiType,
    confidence: f64,
) -> String {
    if let Some(existing) = mappings.get(original) {
        return existing.to_string();
    }
    let placeholder = allocator.allocate(pii_type, Some(confidence));
    mappings.insert(original.to_string(), placeholder.clone());
    placeholder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> DeidentificationEngine {
        DeidentificationEngine::with_defaults().unwrap()
    }

    #[test]
    fn test_pattern_phase_reuses_placeholder() {
        let mut engine = engine();
        let result = engine
            .process_text("mail a@example.org then a@example.org again")
            .unwrap();

        assert_eq!(
            result.processed_text,
            "mail [EMAIL_1_95%] then [EMAIL_1_95%] again"
        );
        assert_eq!(result.total_detections, 1);
        assert_eq!(result.mappings.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let mut engine = engine();
        let result = engine.process_text("").unwrap();
        assert_eq!(result.processed_text, "");
        assert_eq!(result.total_detections, 0);
    }

    #[test]
    fn test_input_too_large() {
        let config = DetectionConfig {
            max_input_chars: 5,
            ..Default::default()
        };
        let mut engine = DeidentificationEngine::new(&config).unwrap();
        let err = engine.process_text("123456").unwrap_err();
        assert!(matches!(err, DeidError::InputTooLarge { len: 6, max: 5 }));
    }

    #[test]
    fn test_placeholders_without_confidence() {
        let config = DetectionConfig {
            placeholder_confidence: false,
            ..Default::default()
        };
        let mut engine = DeidentificationEngine::new(&config).unwrap();
        let result = engine.process_text("ssn 123-45-6789").unwrap();
        assert_eq!(result.processed_text, "ssn [SSN_1]");
    }

    #[test]
    fn test_ml_disabled_skips_heuristics() {
        let mut engine = engine();
        let options = ProcessOptions {
            ml_enabled: false,
            confidence_threshold: 0.7,
        };
        let result = engine
            .process_text_with("Diagnosis: chronic asthma", &options)
            .unwrap();
        assert_eq!(result.ml_detections_count, 0);
        assert_eq!(result.processed_text, "Diagnosis: chronic asthma");
    }

    #[test]
    fn test_heuristic_phase_replaces_case_insensitively() {
        let mut engine = engine();
        let result = engine
            .process_text("Diagnosis: asthma. The ASTHMA is mild")
            .unwrap();
        let medical = result
            .detected_pii
            .iter()
            .find(|d| d.pii_type == PiiType::MedicalInfo)
            .expect("medical detection");
        assert_eq!(medical.original, "asthma");
        assert!(!result.processed_text.to_lowercase().contains("asthma"));
    }

    #[test]
    fn test_literal_pattern_boundaries() {
        assert_eq!(literal_pattern("Acme Inc."), r"\bAcme Inc\.");
        assert_eq!(literal_pattern("asthma"), r"\basthma\b");
        assert_eq!(literal_pattern("(555) 123"), r"\(555\) 123\b");
    }

    #[test]
    fn test_restore_mappings_advances_counters() {
        let mut engine = engine();
        let mut saved = BTreeMap::new();
        saved.insert("old@example.org".to_string(), "[EMAIL_3_95%]".to_string());
        engine.restore_mappings(saved);

        let result = engine.process_text("new@example.org").unwrap();
        assert_eq!(result.processed_text, "[EMAIL_4_95%]");
        assert_eq!(engine.reverse_text("[EMAIL_3_95%]"), "old@example.org");
    }
}
