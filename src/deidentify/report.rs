//! Detection summary reporting
//!
//! Summarizes one or more processing runs by type and by method. Originals
//! are never included; entries show the placeholder that replaced them.

use crate::deidentify::models::ProcessResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One reported detection, without its original value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// PII type label
    #[serde(rename = "type")]
    pub pii_type: String,

    /// Detection method
    pub method: String,

    /// Confidence score (0.0-1.0)
    pub confidence: f64,

    /// Placeholder that replaced the original
    pub replacement: String,
}

/// Detection summary report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Runs summarized
    pub total_runs: usize,

    /// Total detections across runs
    pub total_detections: usize,

    /// Detections made by the heuristic phase
    pub ml_detections: usize,

    /// Detections by PII type
    pub detections_by_type: BTreeMap<String, usize>,

    /// Detections by method
    pub detections_by_method: BTreeMap<String, usize>,

    /// Mean confidence over all detections
    pub average_confidence: f64,

    /// Detections in report order
    pub entries: Vec<ReportEntry>,
}

impl DetectionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for a single run
    pub fn from_result(result: &ProcessResult) -> Self {
        let mut report = Self::new();
        report.add_result(result);
        report
    }

    /// Add the detections of one run
    pub fn add_result(&mut self, result: &ProcessResult) {
        let confidence_sum = self.average_confidence * self.total_detections as f64
            + result.detected_pii.iter().map(|d| d.confidence).sum::<f64>();

        self.total_runs += 1;
        self.total_detections += result.total_detections;
        self.ml_detections += result.ml_detections_count;

        for detection in &result.detected_pii {
            *self
                .detections_by_type
                .entry(detection.pii_type.to_string())
                .or_insert(0) += 1;
            *self
                .detections_by_method
                .entry(detection.method.as_str().to_string())
                .or_insert(0) += 1;
            self.entries.push(ReportEntry {
                pii_type: detection.pii_type.to_string(),
                method: detection.method.as_str().to_string(),
                confidence: detection.confidence,
                replacement: detection.replacement.clone(),
            });
        }

        self.average_confidence = if self.total_detections > 0 {
            confidence_sum / self.total_detections as f64
        } else {
            0.0
        };
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                   DEIDENTIFICATION REPORT                     \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  Runs:                  {}\n", self.total_runs));
        output.push_str(&format!("  Total Detections:      {}\n", self.total_detections));
        output.push_str(&format!("  Heuristic Detections:  {}\n", self.ml_detections));
        output.push_str(&format!(
            "  Average Confidence:    {:.1}%\n",
            self.average_confidence * 100.0
        ));
        output.push('\n');

        if !self.detections_by_type.is_empty() {
            output.push_str("🔍 DETECTIONS BY TYPE\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            push_counts(&mut output, &self.detections_by_type);
            output.push('\n');

            output.push_str("🧭 DETECTIONS BY METHOD\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            push_counts(&mut output, &self.detections_by_method);
            output.push('\n');

            output.push_str("📝 DETECTIONS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for entry in &self.entries {
                output.push_str(&format!(
                    "  {:22} {:18} {:>6.1}%  {}\n",
                    entry.pii_type,
                    entry.method,
                    entry.confidence * 100.0,
                    entry.replacement
                ));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Count lines sorted by count descending, then name
fn push_counts(output: &mut String, counts: &BTreeMap<String, usize>) {
    let mut sorted: Vec<_> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (name, count) in sorted {
        output.push_str(&format!("  {name:30} {count:>5}\n"));
    }
}
