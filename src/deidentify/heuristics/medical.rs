//! Medical record identifiers and diagnoses

use super::{candidate_at, trim_span, HeuristicDetector};
use crate::deidentify::models::{Detection, DetectionMethod, PiiType};
use once_cell::sync::Lazy;
use regex::Regex;

const MEDICAL_CONFIDENCE: f64 = 0.8;

static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i:\b(?:patient id|medical record|mrn)(?:\s*(?:number|no\.?|#))?)\s*:?\s*([A-Za-z0-9\-]*\d[A-Za-z0-9\-]*)",
        r"(?i:\b(?:diagnosis|diagnosed with|condition)(?:\s*(?:is|of|:))?)\s*([A-Za-z][A-Za-z\-']*(?:[ \t]+[A-Za-z][A-Za-z\-']*){0,3})",
    ]
    .iter()
    .map(|source| Regex::new(source).unwrap())
    .collect()
});

pub struct MedicalDetector;

impl HeuristicDetector for MedicalDetector {
    fn name(&self) -> &'static str {
        "medical"
    }

    fn detect(&self, text: &str) -> Vec<Detection> {
        let mut detections = Vec::new();

        for regex in PATTERNS.iter() {
            for caps in regex.captures_iter(text) {
                let Some(capture) = caps.get(1) else { continue };
                let (start, end) = trim_span(text, capture.start(), capture.end());
                if text[start..end].chars().count() <= 2 {
                    continue;
                }
                detections.push(candidate_at(
                    text,
                    start,
                    end,
                    PiiType::MedicalInfo,
                    MEDICAL_CONFIDENCE,
                    DetectionMethod::MedicalContext,
                ));
            }
        }

        detections
    }
}
