//! Reverse command implementation
//!
//! Restores original values in placeholder text using a saved session.

use super::{read_input, write_output};
use crate::deidentify::{MappingStore, Session};
use clap::Args;

/// Arguments for the reverse command
#[derive(Args, Debug)]
pub struct ReverseArgs {
    /// Session file written by `process --session`
    #[arg(long)]
    pub session: String,

    /// Text to reverse (defaults to the session's output text)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,
}

impl ReverseArgs {
    /// Execute the reverse command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(session = %self.session, "Starting reverse command");

        let session = match Session::load(&self.session) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("❌ Failed to load session: {}", self.session);
                eprintln!("   Error: {e}");
                return Ok(2);
            }
        };

        let text = match self.input {
            Some(ref path) => read_input(Some(path.as_str()))?,
            None => session.output_text.clone(),
        };

        let store = MappingStore::from_mappings(session.mappings.clone());
        let restored = store.reverse(&text);
        tracing::debug!(mappings = store.len(), "Placeholders reversed");

        write_output(self.output.as_deref(), &restored)?;
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deidentify::{DeidentificationEngine, ProcessOptions};
    use tempfile::tempdir;

    #[test]
    fn test_reverse_session_output() {
        let dir = tempdir().unwrap();
        let session_path = dir.path().join("session.json");
        let output_path = dir.path().join("restored.txt");

        let input = "Call 555-123-4567 or mail ops@example.net";
        let options = ProcessOptions::default();
        let mut engine = DeidentificationEngine::with_defaults().unwrap();
        let result = engine.process_text_with(input, &options).unwrap();
        Session::from_result(input, &result, &options)
            .save(&session_path)
            .unwrap();

        let args = ReverseArgs {
            session: session_path.to_string_lossy().into_owned(),
            input: None,
            output: Some(output_path.to_string_lossy().into_owned()),
        };
        assert_eq!(args.execute().unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&output_path).unwrap(), input);
    }

    #[test]
    fn test_reverse_missing_session() {
        let args = ReverseArgs {
            session: "/nonexistent/session.json".to_string(),
            input: None,
            output: None,
        };
        assert_eq!(args.execute().unwrap(), 2);
    }
}
