//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AppConfig;
use crate::domain::errors::DeidError;
use crate::domain::result::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static ENV_VAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AppConfig
/// 4. Applies environment variable overrides (DEIDENTIFIER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`DeidError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use deidentifier::config::load_config;
///
/// let config = load_config("deidentifier.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DeidError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DeidError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from `path`, or defaults (plus env overrides) when
/// the file does not exist
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = AppConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration from TOML content
pub fn load_config_str(contents: &str) -> Result<AppConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: AppConfig = toml::from_str(&contents)
        .map_err(|e| DeidError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<()> {
    config.validate().map_err(|e| {
        DeidError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed_line = ENV_VAR_RE.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                if !missing_vars.iter().any(|v| v == var_name) {
                    missing_vars.push(var_name.to_string());
                }
                String::new()
            })
        });
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DeidError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using DEIDENTIFIER_* prefix
///
/// Environment variables follow the pattern: DEIDENTIFIER_<SECTION>_<KEY>
/// For example: DEIDENTIFIER_DETECTION_CONFIDENCE_THRESHOLD
fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    if let Ok(val) = std::env::var("DEIDENTIFIER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    config
        .detection
        .apply_env_overrides()
        .map_err(|e| DeidError::Configuration(format!("{e:#}")))?;

    if let Ok(val) = std::env::var("DEIDENTIFIER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("DEIDENTIFIER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("DEIDENTIFIER_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_substitute_env_vars() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::set_var("DEID_LOADER_TEST_VAR", "test_value");
        let input = "log_path = \"${DEID_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result.trim_end(), "log_path = \"test_value\"");
        std::env::remove_var("DEID_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::remove_var("DEID_LOADER_MISSING_VAR");
        let input = "log_path = \"${DEID_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("DEID_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_comments_are_not_substituted() {
        let input = "# uses ${DEID_LOADER_NEVER_SET}\n";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("nonexistent.toml").is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let toml_content = r#"
[application]
log_level = "debug"

[detection]
confidence_threshold = 0.8
placeholder_confidence = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.detection.confidence_threshold, 0.8);
        assert!(!config.detection.placeholder_confidence);
    }

    #[test]
    fn test_load_config_or_default_missing_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_config_or_default("definitely-not-here.toml").unwrap();
        assert!(config.detection.ml_enabled);
    }
}
