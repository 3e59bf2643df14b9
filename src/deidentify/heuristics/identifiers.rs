//! Identifier-shaped tokens (badge, passport and reference numbers)

use super::{candidate_at, HeuristicDetector};
use crate::deidentify::models::{Detection, DetectionMethod, PiiType};
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERNS: Lazy<Vec<(Regex, f64)>> = Lazy::new(|| {
    [
        (r"\b[A-Z]{2}\d{6,}\b", 0.8),
        (r"\b\d{3,4}[-\s]?\d{3,4}[-\s]?\d{4,}\b", 0.7),
        (r"\b[A-Z]\d{8,}\b", 0.75),
    ]
    .iter()
    .map(|(source, confidence)| (Regex::new(source).unwrap(), *confidence))
    .collect()
});

pub struct IdentifierDetector;

impl HeuristicDetector for IdentifierDetector {
    fn name(&self) -> &'static str {
        "identifier"
    }

    fn detect(&self, text: &str) -> Vec<Detection> {
        PATTERNS
            .iter()
            .flat_map(|(regex, confidence)| {
                regex.find_iter(text).map(move |m| {
                    candidate_at(
                        text,
                        m.start(),
                        m.end(),
                        PiiType::IdNumber,
                        *confidence,
                        DetectionMethod::Pattern,
                    )
                })
            })
            .collect()
    }
}
