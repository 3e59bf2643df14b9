//! Reviewer feedback on detections
//!
//! Feedback is keyed by normalized text and PII type, not by position, so a
//! judgment applies to every later occurrence of the same literal value
//! processed by an engine holding this store.

use crate::deidentify::models::{normalize, PiiType};
use crate::domain::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One reviewer judgment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    /// Text as the reviewer submitted it
    pub text: String,
    #[serde(rename = "type")]
    pub pii_type: PiiType,
    pub is_correct: bool,
    pub timestamp: DateTime<Utc>,
}

/// Table of reviewer judgments
#[derive(Debug, Clone, Default)]
pub struct FeedbackStore {
    entries: HashMap<(String, PiiType), FeedbackEntry>,
}

impl FeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a judgment, overwriting any previous one for the same key
    pub fn add(&mut self, text: &str, pii_type: PiiType, is_correct: bool) {
        let key = (normalize(text), pii_type.clone());
        self.entries.insert(
            key,
            FeedbackEntry {
                text: text.to_string(),
                pii_type,
                is_correct,
                timestamp: Utc::now(),
            },
        );
    }

    pub fn get(&self, text: &str, pii_type: &PiiType) -> Option<&FeedbackEntry> {
        self.entries.get(&(normalize(text), pii_type.clone()))
    }

    /// Whether a reviewer marked this value as not being PII of this type
    pub fn is_rejected(&self, text: &str, pii_type: &PiiType) -> bool {
        self.get(text, pii_type).is_some_and(|entry| !entry.is_correct)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries ordered by timestamp, oldest first
    pub fn entries(&self) -> Vec<&FeedbackEntry> {
        let mut entries: Vec<&FeedbackEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.text.cmp(&b.text)));
        entries
    }

    /// Write all entries to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries())?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read entries from a JSON file
    ///
    /// When a key appears more than once the newest entry wins.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut loaded: Vec<FeedbackEntry> = serde_json::from_str(&content)?;
        loaded.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        let entries = loaded
            .into_iter()
            .map(|entry| ((normalize(&entry.text), entry.pii_type.clone()), entry))
            .collect();
        Ok(Self { entries })
    }

    /// Load from `path`, or start empty if the file does not exist yet
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }
}
