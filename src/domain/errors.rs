//! Domain error types
//!
//! All errors surfaced by the library are expressed through [`DeidError`].
//! Third-party error types (TOML, regex, I/O) are flattened into messages so
//! they never leak through the public API.

use thiserror::Error;

/// Main deidentifier error type
#[derive(Debug, Error)]
pub enum DeidError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid pattern library entries (bad regex, unknown validator)
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Input exceeds the configured size cap
    #[error("Input too large: {len} characters exceeds limit of {max}")]
    InputTooLarge { len: usize, max: usize },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for DeidError {
    fn from(err: std::io::Error) -> Self {
        DeidError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DeidError {
    fn from(err: serde_json::Error) -> Self {
        DeidError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for DeidError {
    fn from(err: toml::de::Error) -> Self {
        DeidError::Configuration(format!("Failed to parse TOML: {err}"))
    }
}

impl From<anyhow::Error> for DeidError {
    fn from(err: anyhow::Error) -> Self {
        DeidError::Other(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_too_large_display() {
        let err = DeidError::InputTooLarge { len: 20, max: 10 };
        assert_eq!(
            err.to_string(),
            "Input too large: 20 characters exceeds limit of 10"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: DeidError = io_err.into();
        assert!(matches!(err, DeidError::Io(_)));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_from_anyhow_keeps_context_chain() {
        let inner = anyhow::anyhow!("bad regex").context("Invalid pattern 'email'");
        let err: DeidError = inner.into();
        let msg = err.to_string();
        assert!(msg.contains("Invalid pattern 'email'"));
        assert!(msg.contains("bad regex"));
    }

    #[test]
    fn test_deid_error_implements_std_error() {
        let err = DeidError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
