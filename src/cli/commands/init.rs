//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "deidentifier.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing deidentifier configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: deidentifier validate-config");
                println!("  3. Process text: deidentifier process --input notes.txt --session session.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Sample configuration with every setting and its default
    fn generate_config() -> String {
        r#"# Deidentifier Configuration File
#
# Every setting is optional and shown with its default value.
# ${VAR} references are replaced from the environment on load, and any
# DEIDENTIFIER_<SECTION>_<KEY> variable overrides the value in this file.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Detection Settings
# ============================================================================
[detection]
# Run the heuristic (context, name, organization...) phase after the
# pattern phase
ml_enabled = true

# Minimum confidence for heuristic detections (0.0 - 1.0)
confidence_threshold = 0.7

# Largest input accepted by a single call, in characters
max_input_chars = 1000000

# Render the confidence suffix in placeholders, e.g. [EMAIL_1_95%]
placeholder_confidence = true

# Custom pattern library (built-in catalog when unset)
# pattern_library = "./patterns/pii_patterns.toml"

# Pattern labels to skip, e.g. ["NAME", "DATE"]
disabled_patterns = []

[detection.audit]
# Append a JSON line per run; values are stored only as SHA-256 hashes
enabled = false
log_path = "./audit/deidentifier.log"
json_format = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON file logging in addition to the console
local_enabled = false

# Log directory
local_path = "./logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_str;
    use tempfile::tempdir;

    #[test]
    fn test_generated_config_parses() {
        let config = load_config_str(&InitArgs::generate_config()).unwrap();
        assert!(config.detection.ml_enabled);
        assert_eq!(config.detection.confidence_threshold, 0.7);
        assert_eq!(config.logging.local_rotation, "daily");
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deidentifier.toml");
        std::fs::write(&path, "# existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# existing");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().unwrap(), 0);
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("[detection]"));
    }
}
