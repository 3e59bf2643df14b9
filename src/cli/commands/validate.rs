//! Validate config command implementation
//!
//! This module implements the `validate-config` command, which loads the
//! configuration file and compiles the pattern library it points at.

use crate::config::load_config;
use crate::deidentify::DeidentificationEngine;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let engine = match DeidentificationEngine::new(&config.detection) {
            Ok(engine) => {
                println!("✅ Pattern library compiled");
                engine
            }
            Err(e) => {
                println!("❌ Pattern library failed to compile");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let detection = &config.detection;
        let library = detection
            .pattern_library
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string());
        let patterns: Vec<&str> = engine
            .catalog()
            .patterns()
            .iter()
            .map(|p| p.name.as_str())
            .collect();

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Heuristics Enabled: {}", detection.ml_enabled);
        println!("  Confidence Threshold: {}", detection.confidence_threshold);
        println!("  Max Input Chars: {}", detection.max_input_chars);
        println!("  Placeholder Confidence: {}", detection.placeholder_confidence);
        println!("  Pattern Library: {library}");
        println!("  Active Patterns: {patterns:?}");
        println!("  Audit Logging: {}", detection.audit.enabled);
        println!("  File Logging: {}", config.logging.local_enabled);
        println!();
        Ok(0)
    }
}
