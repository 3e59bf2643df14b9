// Deidentifier - Reversible PII Detection and Substitution
// Copyright (c) 2025 Deidentifier Contributors
// Licensed under the MIT License

//! # Deidentifier - Reversible PII Detection and Substitution
//!
//! Deidentifier finds personally identifiable information in free text and
//! replaces each value with a typed placeholder such as `[EMAIL_1_95%]`. The
//! mapping from placeholder back to original is kept so the substitution
//! can be reversed later.
//!
//! ## Overview
//!
//! Detection runs in two phases:
//! - **Patterns**: an ordered regex catalog (email, phone, SSN, credit card,
//!   IP address, date, name, address) applied at fixed confidence
//! - **Heuristics**: context phrases, names, organizations, financial,
//!   medical and identifier detectors, filtered by a confidence threshold
//!
//! Reviewer feedback suppresses values marked as false positives in later
//! runs.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`deidentify`] - Detection engine, catalog, heuristics, mappings, feedback
//! - [`domain`] - Error and result types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use deidentifier::deidentify::DeidentificationEngine;
//!
//! let mut engine = DeidentificationEngine::with_defaults()?;
//! let result = engine.process_text("Please contact John Smith at john.smith@example.com")?;
//!
//! for detection in &result.detected_pii {
//!     println!("{} -> {}", detection.pii_type, detection.replacement);
//! }
//!
//! let restored = engine.reverse_text(&result.processed_text);
//! assert_eq!(restored, "Please contact John Smith at john.smith@example.com");
//! # Ok::<(), deidentifier::domain::DeidError>(())
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::DeidError`]:
//!
//! ```rust,no_run
//! use deidentifier::domain::DeidError;
//!
//! fn example() -> Result<(), DeidError> {
//!     let config = deidentifier::config::load_config("deidentifier.toml")?;
//!     let _engine = deidentifier::deidentify::DeidentificationEngine::new(&config.detection)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Deidentifier uses structured logging with the `tracing` crate. Original
//! values are never logged; the audit log stores SHA-256 hashes only.

pub mod cli;
pub mod config;
pub mod deidentify;
pub mod domain;
pub mod logging;
