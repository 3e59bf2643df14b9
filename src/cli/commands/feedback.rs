//! Feedback command implementation
//!
//! Records a reviewer judgment in a feedback file consulted by later runs.

use crate::deidentify::{FeedbackStore, PiiType};
use clap::{ArgGroup, Args};

/// Arguments for the feedback command
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("judgment")
        .required(true)
        .args(["correct", "incorrect"])
))]
pub struct FeedbackArgs {
    /// Feedback file (created if missing)
    #[arg(long)]
    pub feedback: String,

    /// Detected text being judged
    #[arg(long)]
    pub text: String,

    /// PII type label, e.g. NAME or EMAIL
    #[arg(long = "type")]
    pub pii_type: String,

    /// The detection was real PII
    #[arg(long)]
    pub correct: bool,

    /// The detection was a false positive
    #[arg(long)]
    pub incorrect: bool,
}

impl FeedbackArgs {
    /// Execute the feedback command
    pub fn execute(&self) -> anyhow::Result<i32> {
        if self.text.trim().is_empty() {
            eprintln!("❌ --text cannot be empty");
            return Ok(2);
        }

        let mut store = FeedbackStore::load_or_default(&self.feedback)?;
        let pii_type = PiiType::from(self.pii_type.as_str());
        store.add(&self.text, pii_type.clone(), self.correct);
        store.save(&self.feedback)?;

        tracing::info!(
            pii_type = %pii_type,
            is_correct = self.correct,
            entries = store.len(),
            "Feedback recorded"
        );

        let verdict = if self.correct { "correct" } else { "incorrect" };
        println!("✅ Recorded {pii_type} detection as {verdict}");
        println!("   Feedback entries: {}", store.len());
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_records_and_overwrites_judgment() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feedback.json");
        let path = path.to_string_lossy().into_owned();

        let reject = FeedbackArgs {
            feedback: path.clone(),
            text: "Acme Widget".to_string(),
            pii_type: "name".to_string(),
            correct: false,
            incorrect: true,
        };
        assert_eq!(reject.execute().unwrap(), 0);

        let store = FeedbackStore::load(&path).unwrap();
        assert!(store.is_rejected("acme widget", &PiiType::Name));

        let accept = FeedbackArgs {
            correct: true,
            incorrect: false,
            ..reject
        };
        assert_eq!(accept.execute().unwrap(), 0);

        let store = FeedbackStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert!(!store.is_rejected("Acme Widget", &PiiType::Name));
    }

    #[test]
    fn test_empty_text_rejected() {
        let dir = tempdir().unwrap();
        let args = FeedbackArgs {
            feedback: dir.path().join("fb.json").to_string_lossy().into_owned(),
            text: "  ".to_string(),
            pii_type: "NAME".to_string(),
            correct: true,
            incorrect: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
    }
}
