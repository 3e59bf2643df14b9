//! Process command implementation
//!
//! Reads text, replaces detected PII with placeholders and optionally saves
//! a session so the run can be reversed later.

use super::{read_input, write_output};
use crate::config::load_config_or_default;
use crate::deidentify::{
    DeidentificationEngine, DetectionReport, FeedbackStore, ProcessOptions, Session,
};
use crate::domain::DeidError;
use clap::Args;
use std::path::Path;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Input file (`-` or omitted for stdin)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Session file to continue from and save to
    #[arg(long)]
    pub session: Option<String>,

    /// Feedback file consulted during detection
    #[arg(long)]
    pub feedback: Option<String>,

    /// Override the confidence threshold (0.0 - 1.0)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Skip the heuristic phase
    #[arg(long)]
    pub no_ml: bool,

    /// Print a detection report to stderr
    #[arg(long)]
    pub report: bool,

    /// Emit the full result as JSON instead of the processed text
    #[arg(long)]
    pub json: bool,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting process command");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Some(threshold) = self.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                eprintln!("❌ --threshold must be between 0.0 and 1.0, got {threshold}");
                return Ok(2);
            }
        }
        let options = self.options(config.detection.process_options());

        let mut engine = match DeidentificationEngine::new(&config.detection) {
            Ok(engine) => engine,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to build detection engine");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if let Some(ref path) = self.feedback {
            engine = engine.with_feedback(FeedbackStore::load_or_default(path)?);
        }

        if let Some(ref path) = self.session {
            if Path::new(path).exists() {
                let previous = Session::load(path)?;
                engine.restore_mappings(previous.mappings);
            }
        }

        let input = read_input(self.input.as_deref())?;
        let result = match engine.process_text_with(&input, &options) {
            Ok(result) => result,
            Err(e @ DeidError::InputTooLarge { .. }) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
            Err(e) => return Err(e.into()),
        };

        if self.json {
            let json = serde_json::to_string_pretty(&result)?;
            write_output(self.output.as_deref(), &format!("{json}\n"))?;
        } else {
            write_output(self.output.as_deref(), &result.processed_text)?;
        }

        if self.report {
            let report = DetectionReport::from_result(&result);
            if self.json {
                eprintln!("{}", report.format_json()?);
            } else {
                eprint!("{}", report.format_console());
            }
        }

        if let Some(ref path) = self.session {
            Session::from_result(&input, &result, &options).save(path)?;
            tracing::info!(session = %path, "Session saved");
        }

        Ok(0)
    }

    /// Apply the CLI overrides on top of configured options
    pub fn options(&self, defaults: ProcessOptions) -> ProcessOptions {
        ProcessOptions {
            ml_enabled: defaults.ml_enabled && !self.no_ml,
            confidence_threshold: self.threshold.unwrap_or(defaults.confidence_threshold),
        }
    }
}
