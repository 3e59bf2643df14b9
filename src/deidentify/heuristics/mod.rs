//! Heuristic (phase 2) detectors
//!
//! Each detector runs independently over the original, unmodified input and
//! emits zero or more candidate [`Detection`]s with a method tag and a
//! confidence score. Candidates may overlap; reconciling them is the job of
//! [`crate::deidentify::filter`].

pub mod context;
pub mod exclusions;
pub mod financial;
pub mod identifiers;
pub mod medical;
pub mod names;
pub mod organization;

use crate::deidentify::models::{Detection, DetectionMethod, PiiType};
use crate::deidentify::placeholder::contains_placeholder;

/// Characters of surrounding text kept on each side of a candidate
pub const CONTEXT_RADIUS: usize = 30;

/// Trait for heuristic detector implementations
pub trait HeuristicDetector: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Emit candidates found in `text`
    fn detect(&self, text: &str) -> Vec<Detection>;
}

/// The set of heuristic detectors run in phase 2
pub struct HeuristicDetectors {
    detectors: Vec<Box<dyn HeuristicDetector>>,
}

impl HeuristicDetectors {
    /// Built-in detector set
    pub fn new() -> Self {
        Self {
            detectors: vec![
                Box::new(names::NamedEntityDetector),
                Box::new(context::ContextPhraseDetector),
                Box::new(names::CapitalizedNameDetector),
                Box::new(organization::OrganizationDetector),
                Box::new(financial::FinancialDetector),
                Box::new(medical::MedicalDetector),
                Box::new(identifiers::IdentifierDetector),
            ],
        }
    }

    /// Empty set, for hosts that register their own detectors
    pub fn empty() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Register an additional detector
    pub fn with_detector(mut self, detector: Box<dyn HeuristicDetector>) -> Self {
        self.detectors.push(detector);
        self
    }

    /// Names of the registered detectors, in run order
    pub fn names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Run every detector and drop candidates on the exclusion lists or
    /// containing a placeholder from an earlier run
    pub fn detect(&self, text: &str) -> Vec<Detection> {
        let mut candidates = Vec::new();

        for detector in &self.detectors {
            let found = detector.detect(text);
            tracing::trace!(detector = detector.name(), candidates = found.len(), "Heuristic pass");
            candidates.extend(found);
        }

        let before = candidates.len();
        candidates.retain(|c| {
            !exclusions::is_excluded(&c.original) && !contains_placeholder(&c.original)
        });
        tracing::debug!(
            candidates = candidates.len(),
            excluded = before - candidates.len(),
            "Heuristic detection complete"
        );

        candidates
    }
}

impl Default for HeuristicDetectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Surrounding text window of `CONTEXT_RADIUS` characters on each side,
/// clipped at the text boundaries
pub fn extract_context(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_RADIUS - 1)
        .map_or(0, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(CONTEXT_RADIUS)
        .map_or(text.len(), |(i, _)| end + i);
    text[from..to].to_string()
}

/// Up to `CONTEXT_RADIUS` characters immediately before `start`
pub(crate) fn preceding_window(text: &str, start: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_RADIUS - 1)
        .map_or(0, |(i, _)| i);
    &text[from..start]
}

/// Narrow a captured span: strip surrounding whitespace and trailing `.`/`,`
pub(crate) fn trim_span(text: &str, start: usize, end: usize) -> (usize, usize) {
    let slice = &text[start..end];
    let leading = slice.len() - slice.trim_start().len();
    let trimmed = slice
        .trim_start()
        .trim_end_matches(|c: char| c.is_whitespace() || c == '.' || c == ',');
    (start + leading, start + leading + trimmed.len())
}

/// Build a candidate for the verbatim span `text[start..end]`
pub(crate) fn candidate_at(
    text: &str,
    start: usize,
    end: usize,
    pii_type: PiiType,
    confidence: f64,
    method: DetectionMethod,
) -> Detection {
    Detection::new(pii_type, &text[start..end], confidence, method)
        .with_context(extract_context(text, start, end))
}
