//! Saved processing session
//!
//! A session is the state a host keeps between invocations: the last input
//! and output, the mapping table and the options used. Restoring it into an
//! engine lets `reverse_text` work in a later process.

use crate::deidentify::engine::DeidentificationEngine;
use crate::deidentify::models::{Detection, ProcessOptions, ProcessResult};
use crate::domain::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Persisted session snapshot (camelCase JSON)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub input_text: String,
    pub output_text: String,
    pub mappings: BTreeMap<String, String>,
    #[serde(rename = "detectedPII")]
    pub detected_pii: Vec<Detection>,
    pub ml_enabled: bool,
    pub confidence_threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Snapshot a finished run
    pub fn from_result(input: &str, result: &ProcessResult, options: &ProcessOptions) -> Self {
        Self {
            input_text: input.to_string(),
            output_text: result.processed_text.clone(),
            mappings: result.mappings.clone(),
            detected_pii: result.detected_pii.clone(),
            ml_enabled: options.ml_enabled,
            confidence_threshold: options.confidence_threshold,
            saved_at: None,
        }
    }

    /// Options the session was processed with
    pub fn options(&self) -> ProcessOptions {
        ProcessOptions {
            ml_enabled: self.ml_enabled,
            confidence_threshold: self.confidence_threshold,
        }
    }

    /// Load mappings and options into `engine`
    pub fn restore_engine(&self, engine: &mut DeidentificationEngine) {
        engine.restore_mappings(self.mappings.clone());
        engine.set_ml_enabled(self.ml_enabled);
        engine.set_confidence_threshold(self.confidence_threshold);
        tracing::debug!(mappings = self.mappings.len(), "Session restored");
    }

    /// Write the session as pretty JSON, stamping `saved_at`
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.saved_at = Some(Utc::now());
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
