//! Person-name heuristics
//!
//! Two detectors live here:
//! - [`NamedEntityDetector`] captures names anchored by a title, an
//!   introduction, a signature, a greeting or a possessive.
//! - [`CapitalizedNameDetector`] pairs consecutive capitalized tokens.

use super::{candidate_at, exclusions, preceding_window, HeuristicDetector};
use crate::deidentify::models::{ContextCategory, Detection, DetectionMethod, PiiType};
use once_cell::sync::Lazy;
use regex::Regex;

/// Capitalized word, optionally followed by more on the same line
const NAME_CAPTURE: &str = r"([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*)";

struct NamePattern {
    regex: Regex,
    category: Option<ContextCategory>,
}

static NAME_PATTERNS: Lazy<Vec<NamePattern>> = Lazy::new(|| {
    let build = |source: String, category: Option<ContextCategory>| NamePattern {
        regex: Regex::new(&source).unwrap(),
        category,
    };
    vec![
        // Titles
        build(format!(r"(?i:\b(?:mr|mrs|ms|dr|prof))\.?\s+{NAME_CAPTURE}"), None),
        // Introductions
        build(
            format!(r"(?i:\b(?:my name is|called|i am|i'm))\s+{NAME_CAPTURE}"),
            Some(ContextCategory::Identity),
        ),
        // Signatures
        build(format!(r"(?i:\b(?:sincerely|regards|best)),?\s*{NAME_CAPTURE}"), None),
        // Greetings
        build(r"(?i:\b(?:hello|hi|dear))\s+([A-Z][a-z]+)".to_string(), None),
        // Possessives
        build(
            format!(r"\b{NAME_CAPTURE}'s\s+(?i:email|phone|address|office)"),
            None,
        ),
    ]
});

static SALUTATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:dear|hello|hi|sincerely|regards)\b").unwrap());

static SELF_IDENTIFICATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:my name is|called|i am|i'm)").unwrap());

static TITLE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:mr|mrs|ms|dr)\.?$").unwrap());

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

const COMMON_FIRST_NAMES: &[&str] = &[
    "john", "jane", "michael", "sarah", "david", "emily", "james", "mary",
];

/// Accept captures containing a common first name, or short alphabetic ones
fn is_likely_name(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower
        .split_whitespace()
        .any(|word| COMMON_FIRST_NAMES.contains(&word))
        || ((2..=20).contains(&text.chars().count())
            && text.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace()))
}

/// Score an anchored name capture from the text that precedes it
pub fn anchored_name_confidence(name: &str, preceding: &str) -> f64 {
    let mut confidence: f64 = 0.7;

    if SALUTATION_RE.is_match(preceding) {
        confidence += 0.1;
    }
    if SELF_IDENTIFICATION_RE.is_match(preceding) {
        confidence += 0.15;
    }
    if name.split_whitespace().count() > 1 {
        confidence += 0.1;
    }

    confidence.min(0.95)
}

/// Score a capitalized-pair candidate
pub fn capitalized_pair_confidence(words: &[&str], preceded_by_title: bool) -> f64 {
    let mut confidence: f64 = 0.6;

    if words.len() == 2 {
        confidence += 0.1;
    }
    if words.iter().all(|w| (3..=12).contains(&w.chars().count())) {
        confidence += 0.1;
    }
    if preceded_by_title {
        confidence += 0.15;
    }

    confidence.min(0.9)
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.clone().next().is_some()
        && chars.all(|c| c.is_ascii_lowercase())
}

fn has_name_characteristics(word: &str) -> bool {
    (2..=15).contains(&word.len()) && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// Names anchored by surrounding phrasing
pub struct NamedEntityDetector;

impl HeuristicDetector for NamedEntityDetector {
    fn name(&self) -> &'static str {
        "named_entity"
    }

    fn detect(&self, text: &str) -> Vec<Detection> {
        let mut detections = Vec::new();

        for pattern in NAME_PATTERNS.iter() {
            for caps in pattern.regex.captures_iter(text) {
                let Some(name) = caps.get(1) else { continue };
                let candidate = name.as_str().trim();
                if candidate.is_empty()
                    || exclusions::is_common_false_positive(candidate)
                    || !is_likely_name(candidate)
                {
                    continue;
                }

                let preceding = preceding_window(text, name.start());
                let confidence = anchored_name_confidence(candidate, preceding);

                let mut detection = candidate_at(
                    text,
                    name.start(),
                    name.end(),
                    PiiType::Name,
                    confidence,
                    DetectionMethod::Ner,
                );
                if let Some(category) = pattern.category {
                    detection = detection.with_category(category);
                }
                detections.push(detection);
            }
        }

        detections
    }
}

/// Two consecutive capitalized, alphabetic tokens
pub struct CapitalizedNameDetector;

impl HeuristicDetector for CapitalizedNameDetector {
    fn name(&self) -> &'static str {
        "capitalized_name"
    }

    fn detect(&self, text: &str) -> Vec<Detection> {
        let tokens: Vec<regex::Match<'_>> = TOKEN_RE.find_iter(text).collect();
        let mut detections = Vec::new();

        for (i, pair) in tokens.windows(2).enumerate() {
            let (first, second) = (pair[0].as_str(), pair[1].as_str());
            if !(is_capitalized(first)
                && is_capitalized(second)
                && has_name_characteristics(first)
                && has_name_characteristics(second))
            {
                continue;
            }

            let (start, end) = (pair[0].start(), pair[1].end());
            let full_name = &text[start..end];
            if exclusions::is_common_false_positive(full_name) {
                continue;
            }

            let preceded_by_title = i > 0 && TITLE_TOKEN_RE.is_match(tokens[i - 1].as_str());
            let confidence = capitalized_pair_confidence(&[first, second], preceded_by_title);
            if confidence > 0.6 {
                detections.push(candidate_at(
                    text,
                    start,
                    end,
                    PiiType::Name,
                    confidence,
                    DetectionMethod::Semantic,
                ));
            }
        }

        detections
    }
}
