//! Configuration management
//!
//! TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DEIDENTIFIER_<SECTION>_<KEY>` overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [detection]
//! ml_enabled = true
//! confidence_threshold = 0.7
//! max_input_chars = 1000000
//! placeholder_confidence = true
//! disabled_patterns = []
//!
//! [detection.audit]
//! enabled = false
//! log_path = "${DEID_AUDIT_DIR}/deidentifier.log"
//! json_format = true
//!
//! [logging]
//! local_enabled = false
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```
//!
//! ```rust,no_run
//! use deidentifier::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("deidentifier.toml")?;
//! println!("Threshold: {}", config.detection.confidence_threshold);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

pub use crate::deidentify::config::{AuditConfig, DetectionConfig};
pub use loader::{load_config, load_config_or_default, load_config_str};
pub use schema::{AppConfig, ApplicationConfig, LoggingConfig};
