//! Detection configuration

use crate::deidentify::models::ProcessOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Detection engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Run the heuristic phase
    #[serde(default = "default_ml_enabled")]
    pub ml_enabled: bool,

    /// Minimum confidence for heuristic detections (0.0 - 1.0)
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Largest input, in characters, a single call accepts
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Render the `_NN%` confidence suffix in placeholders
    #[serde(default = "default_placeholder_confidence")]
    pub placeholder_confidence: bool,

    /// Path to pattern library TOML file (built-in catalog when unset)
    pub pattern_library: Option<PathBuf>,

    /// Catalog labels to skip, e.g. `["NAME"]`
    #[serde(default)]
    pub disabled_patterns: Vec<String>,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_ml_enabled() -> bool {
    true
}

fn default_confidence_threshold() -> f64 {
    0.7
}

fn default_max_input_chars() -> usize {
    1_000_000
}

fn default_placeholder_confidence() -> bool {
    true
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            ml_enabled: default_ml_enabled(),
            confidence_threshold: default_confidence_threshold(),
            max_input_chars: default_max_input_chars(),
            placeholder_confidence: default_placeholder_confidence(),
            pattern_library: None,
            disabled_patterns: Vec::new(),
            audit: AuditConfig::default(),
        }
    }
}

impl DetectionConfig {
    /// Per-call options derived from this configuration
    pub fn process_options(&self) -> ProcessOptions {
        ProcessOptions {
            ml_enabled: self.ml_enabled,
            confidence_threshold: self.confidence_threshold,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            anyhow::bail!(
                "confidence_threshold must be between 0.0 and 1.0, got {}",
                self.confidence_threshold
            );
        }

        if self.max_input_chars == 0 {
            anyhow::bail!("max_input_chars must be greater than 0");
        }

        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }

        self.audit
            .validate()
            .context("Invalid audit configuration")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("DEIDENTIFIER_DETECTION_ML_ENABLED") {
            self.ml_enabled = val
                .parse()
                .context("Invalid DEIDENTIFIER_DETECTION_ML_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("DEIDENTIFIER_DETECTION_CONFIDENCE_THRESHOLD") {
            self.confidence_threshold = val
                .parse()
                .context("Invalid DEIDENTIFIER_DETECTION_CONFIDENCE_THRESHOLD value")?;
        }

        if let Ok(val) = std::env::var("DEIDENTIFIER_DETECTION_MAX_INPUT_CHARS") {
            self.max_input_chars = val
                .parse()
                .context("Invalid DEIDENTIFIER_DETECTION_MAX_INPUT_CHARS value")?;
        }

        if let Ok(val) = std::env::var("DEIDENTIFIER_DETECTION_PATTERN_LIBRARY") {
            self.pattern_library = Some(PathBuf::from(val));
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/deidentifier.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("Audit log_path cannot be empty when audit is enabled");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("DEIDENTIFIER_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid DEIDENTIFIER_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("DEIDENTIFIER_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("DEIDENTIFIER_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid DEIDENTIFIER_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectionConfig::default();
        assert!(config.ml_enabled);
        assert_eq!(config.confidence_threshold, 0.7);
        assert!(config.placeholder_confidence);
        assert!(config.disabled_patterns.is_empty());
        assert!(!config.audit.enabled);
        assert!(config.audit.json_format);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = DetectionConfig {
            confidence_threshold: 1.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("confidence_threshold"));
    }

    #[test]
    fn test_pattern_library_must_exist() {
        let config = DetectionConfig {
            pattern_library: Some(PathBuf::from("/nonexistent/patterns.toml")),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_process_options() {
        let config = DetectionConfig {
            ml_enabled: false,
            confidence_threshold: 0.85,
            ..Default::default()
        };
        let options = config.process_options();
        assert!(!options.ml_enabled);
        assert_eq!(options.confidence_threshold, 0.85);
    }
}
