//! PII detection and substitution
//!
//! # Architecture
//!
//! - **Catalog**: ordered regex patterns loaded from a TOML library (phase 1)
//! - **Heuristics**: context, name, organization, financial, medical and
//!   identifier detectors scored by confidence (phase 2)
//! - **Filter**: threshold, deduplication and reviewer feedback
//! - **Placeholders and mappings**: typed, counter-based tokens and the
//!   reversible table behind them
//! - **Audit**: JSON-lines run log with hashed values
//!
//! # Usage
//!
//! ```rust
//! use deidentifier::deidentify::DeidentificationEngine;
//!
//! let mut engine = DeidentificationEngine::with_defaults()?;
//! let result = engine.process_text("Reach me at jane.doe@example.com")?;
//! assert!(!result.processed_text.contains("jane.doe@example.com"));
//! assert_eq!(engine.reverse_text(&result.processed_text), "Reach me at jane.doe@example.com");
//! # Ok::<(), deidentifier::domain::DeidError>(())
//! ```

pub mod audit;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod feedback;
pub mod filter;
pub mod heuristics;
pub mod mapping;
pub mod models;
pub mod placeholder;
pub mod report;
pub mod session;

pub use catalog::{Highlight, PatternCatalog};
pub use config::{AuditConfig, DetectionConfig};
pub use engine::DeidentificationEngine;
pub use feedback::{FeedbackEntry, FeedbackStore};
pub use mapping::MappingStore;
pub use models::{Detection, DetectionMethod, PiiType, ProcessOptions, ProcessResult};
pub use report::DetectionReport;
pub use session::Session;
