//! Audit logger for processing runs

use crate::deidentify::models::{Detection, ProcessOptions, ProcessResult};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// What the engine knows about a finished run
#[derive(Debug, Clone, Copy)]
pub struct RunSummary<'a> {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub input_chars: usize,
    pub processing_time_ms: u64,
    pub options: &'a ProcessOptions,
    pub result: &'a ProcessResult,
}

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    run_id: String,
    input_chars: usize,
    ml_enabled: bool,
    confidence_threshold: f64,
    detections_count: usize,
    ml_detections_count: usize,
    processing_time_ms: u64,
    detections: Vec<AuditDetection>,
}

/// Audit detection entry (with hashed PII)
#[derive(Debug, Serialize)]
struct AuditDetection {
    #[serde(rename = "type")]
    pii_type: String,
    method: String,
    confidence: f64,
    /// SHA-256 hash of original value (never log plaintext PII)
    value_hash: String,
}

/// Audit logger for processing runs
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create audit log directory: {}", parent.display())
                    })?;
                }
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log a finished processing run
    pub fn log_run(&self, run: &RunSummary<'_>) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: run.started_at.to_rfc3339(),
            run_id: run.run_id.to_string(),
            input_chars: run.input_chars,
            ml_enabled: run.options.ml_enabled,
            confidence_threshold: run.options.confidence_threshold,
            detections_count: run.result.total_detections,
            ml_detections_count: run.result.ml_detections_count,
            processing_time_ms: run.processing_time_ms,
            detections: run
                .result
                .detected_pii
                .iter()
                .map(|d| self.create_audit_detection(d))
                .collect(),
        };

        self.write_entry(&entry)
    }

    fn create_audit_detection(&self, detection: &Detection) -> AuditDetection {
        AuditDetection {
            pii_type: detection.pii_type.to_string(),
            method: detection.method.as_str().to_string(),
            confidence: detection.confidence,
            value_hash: hash_pii_value(&detection.original),
        }
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            writeln!(
                file,
                "[{}] Run: {} | Chars: {} | Detections: {} ({} heuristic) | Time: {}ms",
                entry.timestamp,
                entry.run_id,
                entry.input_chars,
                entry.detections_count,
                entry.ml_detections_count,
                entry.processing_time_ms
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}

/// Hash a PII value using SHA-256
pub fn hash_pii_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}
