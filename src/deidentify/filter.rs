//! Confidence filtering and deduplication of heuristic candidates

use crate::deidentify::feedback::FeedbackStore;
use crate::deidentify::models::{normalize, Detection, PiiType};
use std::collections::{HashMap, HashSet};

/// Reconciles the heuristic candidate set before substitution
#[derive(Debug, Clone, Copy)]
pub struct CandidateFilter {
    threshold: f64,
}

impl CandidateFilter {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Filter `candidates` in four steps:
    ///
    /// 1. drop candidates whose normalized text was consumed in phase 1
    /// 2. drop candidates below the confidence threshold
    /// 3. keep the highest-confidence candidate per (lower-cased text, type)
    /// 4. drop candidates a reviewer marked incorrect
    ///
    /// Survivors are returned by descending confidence; ties keep the order
    /// in which their keys were first seen.
    pub fn apply(
        &self,
        candidates: Vec<Detection>,
        consumed: &HashSet<String>,
        feedback: &FeedbackStore,
    ) -> Vec<Detection> {
        let mut slots: HashMap<(String, PiiType), usize> = HashMap::new();
        let mut kept: Vec<Detection> = Vec::new();

        for candidate in candidates {
            if consumed.contains(&normalize(&candidate.original)) {
                continue;
            }
            if candidate.confidence < self.threshold {
                continue;
            }

            match slots.get(&candidate.key()) {
                Some(&slot) => {
                    if candidate.confidence > kept[slot].confidence {
                        kept[slot] = candidate;
                    }
                }
                None => {
                    slots.insert(candidate.key(), kept.len());
                    kept.push(candidate);
                }
            }
        }

        kept.retain(|c| !feedback.is_rejected(&c.original, &c.pii_type));
        kept.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deidentify::models::DetectionMethod;

    fn name(text: &str, confidence: f64, method: DetectionMethod) -> Detection {
        Detection::new(PiiType::Name, text, confidence, method)
    }

    #[test]
    fn test_threshold() {
        let filter = CandidateFilter::new(0.75);
        let kept = filter.apply(
            vec![
                name("Ann Lee", 0.7, DetectionMethod::Semantic),
                name("Bob Ray", 0.8, DetectionMethod::Semantic),
            ],
            &HashSet::new(),
            &FeedbackStore::new(),
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].original, "Bob Ray");
    }

    #[test]
    fn test_dedup_keeps_highest() {
        let filter = CandidateFilter::new(0.5);
        let kept = filter.apply(
            vec![
                name("Jane Doe", 0.8, DetectionMethod::Semantic),
                name("jane doe", 0.95, DetectionMethod::Ner),
                Detection::new(PiiType::Organization, "Jane Doe", 0.8, DetectionMethod::Semantic),
            ],
            &HashSet::new(),
            &FeedbackStore::new(),
        );
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].method, DetectionMethod::Ner);
        assert_eq!(kept[1].pii_type, PiiType::Organization);
    }

    #[test]
    fn test_consumed_and_feedback() {
        let filter = CandidateFilter::new(0.5);
        let consumed: HashSet<String> = ["jane@example.com".to_string()].into_iter().collect();
        let mut feedback = FeedbackStore::new();
        feedback.add("John Smith", PiiType::Name, false);

        let kept = filter.apply(
            vec![
                Detection::new(PiiType::Contact, "Jane@Example.com", 0.9, DetectionMethod::Contextual),
                name("John Smith", 0.95, DetectionMethod::Ner),
                name("Ada Byron", 0.8, DetectionMethod::Semantic),
            ],
            &consumed,
            &feedback,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].original, "Ada Byron");
    }

    #[test]
    fn test_sorted_by_confidence_stable() {
        let filter = CandidateFilter::new(0.0);
        let kept = filter.apply(
            vec![
                name("Ann Lee", 0.8, DetectionMethod::Semantic),
                name("Bob Ray", 0.9, DetectionMethod::Semantic),
                name("Cy Young", 0.8, DetectionMethod::Semantic),
            ],
            &HashSet::new(),
            &FeedbackStore::new(),
        );
        let order: Vec<&str> = kept.iter().map(|d| d.original.as_str()).collect();
        assert_eq!(order, vec!["Bob Ray", "Ann Lee", "Cy Young"]);
    }
}
