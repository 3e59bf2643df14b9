//! Organization names

use super::{candidate_at, HeuristicDetector};
use crate::deidentify::models::{Detection, DetectionMethod, PiiType};
use once_cell::sync::Lazy;
use regex::Regex;

const ORGANIZATION_CONFIDENCE: f64 = 0.8;

static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "Acme Widgets" in "Acme Widgets Inc", "Initech" in "Initech LLC"
        r"\b([A-Z][A-Za-z&]*(?:[ \t]+[A-Z][A-Za-z&]*)*)[ \t]+(?:Inc|LLC|Corp|Corporation|Company|Ltd)\b",
        // "works at Globex company"
        r"(?i:\b(?:at|for|with))\s+([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*)\s+(?i:company|corporation|firm)\b",
    ]
    .iter()
    .map(|source| Regex::new(source).unwrap())
    .collect()
});

/// Capitalized sequences next to a corporate suffix or noun
pub struct OrganizationDetector;

impl HeuristicDetector for OrganizationDetector {
    fn name(&self) -> &'static str {
        "organization"
    }

    fn detect(&self, text: &str) -> Vec<Detection> {
        PATTERNS
            .iter()
            .flat_map(|regex| regex.captures_iter(text))
            .filter_map(|caps| caps.get(1))
            .map(|m| {
                candidate_at(
                    text,
                    m.start(),
                    m.end(),
                    PiiType::Organization,
                    ORGANIZATION_CONFIDENCE,
                    DetectionMethod::Semantic,
                )
            })
            .collect()
    }
}
