//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logging with rotation
//!
//! Detected values are never written to logs; only types, counts, methods
//! and confidences are.
//!
//! # Example
//!
//! ```no_run
//! use deidentifier::logging::init_logging;
//! use deidentifier::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a processing run
///
/// # Example
///
/// ```no_run
/// use deidentifier::log_process_start;
///
/// let run_id = uuid::Uuid::new_v4();
/// log_process_start!(run_id, 1024);
/// ```
#[macro_export]
macro_rules! log_process_start {
    ($run_id:expr, $input_chars:expr) => {
        tracing::info!(
            run_id = %$run_id,
            input_chars = $input_chars,
            "Starting deidentification"
        );
    };
}

/// Log the completion of a processing run
///
/// # Example
///
/// ```no_run
/// use deidentifier::log_process_complete;
///
/// let run_id = uuid::Uuid::new_v4();
/// log_process_complete!(run_id, 3, 1, 12u64);
/// ```
#[macro_export]
macro_rules! log_process_complete {
    ($run_id:expr, $detections:expr, $ml_detections:expr, $elapsed_ms:expr) => {
        tracing::info!(
            run_id = %$run_id,
            detections = $detections,
            ml_detections = $ml_detections,
            duration_ms = $elapsed_ms,
            "Deidentification completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use deidentifier::log_error_with_context;
/// use deidentifier::domain::DeidError;
///
/// let error = DeidError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand_without_subscriber() {
        let run_id = uuid::Uuid::new_v4();
        crate::log_process_start!(run_id, 10);
        crate::log_process_complete!(run_id, 2, 1, 5u64);
        crate::log_error_with_context!("boom", "while testing");
    }
}
