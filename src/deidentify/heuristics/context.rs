//! Phrase-anchored captures ("call me at ...", "employee id ...")

use super::{candidate_at, trim_span, HeuristicDetector};
use crate::deidentify::models::{ContextCategory, Detection, DetectionMethod, PiiType};
use once_cell::sync::Lazy;
use regex::Regex;

struct PhraseRule {
    regex: Regex,
    pii_type: PiiType,
    category: ContextCategory,
    confidence: f64,
}

impl PhraseRule {
    fn new(source: &str, pii_type: PiiType, category: ContextCategory, confidence: f64) -> Self {
        Self {
            regex: Regex::new(source).unwrap(),
            pii_type,
            category,
            confidence,
        }
    }
}

static PHRASE_RULES: Lazy<Vec<PhraseRule>> = Lazy::new(|| {
    use ContextCategory::*;
    vec![
        PhraseRule::new(
            r"(?i:\b(?:reach me at|contact me at|email me at))\s+([^\s,]+)",
            PiiType::Contact,
            Contact,
            0.9,
        ),
        PhraseRule::new(
            r"(?i:\b(?:call me at|phone me at|my number is))\s+(\(?\d[\d\-\.\(\)\s]*\d)",
            PiiType::Contact,
            Contact,
            0.9,
        ),
        PhraseRule::new(
            r"(?i:\b(?:my address is|i live at|located at))\s+([^,\n]+)",
            PiiType::Contact,
            Contact,
            0.9,
        ),
        PhraseRule::new(
            r"(?i:\b(?:employee id|badge number|id number|license number|driver's license|ssn)(?:\s+is)?)\s*[:#]?\s*([A-Za-z0-9\-]*\d[A-Za-z0-9\-]*)",
            PiiType::Identification,
            Identification,
            0.9,
        ),
        PhraseRule::new(
            r"(?i:\b(?:account number|routing number|my card number|credit card number)(?:\s+is)?)\s*[:#]?\s*(\d[\d\s\-]*\d)",
            PiiType::Financial,
            Financial,
            0.9,
        ),
        PhraseRule::new(
            r"(?i:\b(?:my birthday is|born on|date of birth(?:\s+is)?))\s*:?\s*([^\s,\n]+)",
            PiiType::Personal,
            Personal,
            0.85,
        ),
        PhraseRule::new(
            r"(?i:\b(?:my social security number is|my social is|social security number))\s*:?\s*(\d[\d\-]*\d)",
            PiiType::Personal,
            Personal,
            0.85,
        ),
    ]
});

/// Context-phrase detector for contact, identification, financial and
/// personal phrasing
pub struct ContextPhraseDetector;

impl HeuristicDetector for ContextPhraseDetector {
    fn name(&self) -> &'static str {
        "context_phrase"
    }

    fn detect(&self, text: &str) -> Vec<Detection> {
        let mut detections = Vec::new();

        for rule in PHRASE_RULES.iter() {
            for caps in rule.regex.captures_iter(text) {
                let Some(capture) = caps.get(1) else { continue };
                let (start, end) = trim_span(text, capture.start(), capture.end());
                if text[start..end].chars().count() <= 2 {
                    continue;
                }

                detections.push(
                    candidate_at(
                        text,
                        start,
                        end,
                        rule.pii_type.clone(),
                        rule.confidence,
                        DetectionMethod::Contextual,
                    )
                    .with_category(rule.category),
                );
            }
        }

        detections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("You can reach me at jdoe@corp.example, thanks", "jdoe@corp.example", PiiType::Contact ; "email phrase")]
    #[test_case("Please call me at 555-867-5309 tonight", "555-867-5309", PiiType::Contact ; "phone phrase")]
    #[test_case("My address is 12 Harbour Lane, Springfield", "12 Harbour Lane", PiiType::Contact ; "address phrase")]
    #[test_case("Employee ID: EMP-4471 on file", "EMP-4471", PiiType::Identification ; "employee id")]
    #[test_case("The account number is 0042 7781 9920.", "0042 7781 9920", PiiType::Financial ; "account number")]
    #[test_case("I was born on 1984-03-12, in spring", "1984-03-12", PiiType::Personal ; "birth date")]
    fn test_phrase_capture(text: &str, expected: &str, pii_type: PiiType) {
        let found = ContextPhraseDetector.detect(text);
        let hit = found
            .iter()
            .find(|d| d.original == expected)
            .unwrap_or_else(|| panic!("no capture {expected:?} in {found:?}"));
        assert_eq!(hit.pii_type, pii_type);
        assert_eq!(hit.method, DetectionMethod::Contextual);
    }

    #[test]
    fn test_identification_requires_digit() {
        let found = ContextPhraseDetector.detect("Bring your driver's license tomorrow");
        assert!(found.is_empty());
    }

    #[test]
    fn test_category_and_confidence() {
        let found = ContextPhraseDetector.detect("my birthday is March");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, Some(ContextCategory::Personal));
        assert!((found[0].confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_short_capture_skipped() {
        let found = ContextPhraseDetector.detect("contact me at it");
        assert!(found.is_empty());
    }
}
