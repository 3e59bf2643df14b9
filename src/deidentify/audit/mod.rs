//! Audit logging module
//!
//! Records one entry per processing run. Detected values are stored only as
//! SHA-256 hashes.

pub mod logger;

pub use logger::{AuditLogger, RunSummary};
