//! Detection data models

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// PII type
///
/// The set is open-ended: labels that are not built in (for example from a
/// custom pattern library) are carried as [`PiiType::Custom`]. Serialized as
/// its upper-case label, e.g. `"CREDIT_CARD"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PiiType {
    Email,
    Phone,
    Ssn,
    CreditCard,
    IpAddress,
    Date,
    Name,
    Address,
    Organization,
    Contact,
    Identification,
    Financial,
    BankAccount,
    MedicalInfo,
    Personal,
    IdNumber,
    /// Caller-defined label
    Custom(String),
}

impl PiiType {
    /// Upper-case label used in placeholders and reports
    pub fn label(&self) -> Cow<'_, str> {
        let label = match self {
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Ssn => "SSN",
            Self::CreditCard => "CREDIT_CARD",
            Self::IpAddress => "IP_ADDRESS",
            Self::Date => "DATE",
            Self::Name => "NAME",
            Self::Address => "ADDRESS",
            Self::Organization => "ORGANIZATION",
            Self::Contact => "CONTACT",
            Self::Identification => "IDENTIFICATION",
            Self::Financial => "FINANCIAL",
            Self::BankAccount => "BANK_ACCOUNT",
            Self::MedicalInfo => "MEDICAL_INFO",
            Self::Personal => "PERSONAL",
            Self::IdNumber => "ID_NUMBER",
            Self::Custom(label) => return Cow::Borrowed(label.as_str()),
        };
        Cow::Borrowed(label)
    }
}

impl From<&str> for PiiType {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "EMAIL" => Self::Email,
            "PHONE" => Self::Phone,
            "SSN" => Self::Ssn,
            "CREDIT_CARD" => Self::CreditCard,
            "IP_ADDRESS" => Self::IpAddress,
            "DATE" => Self::Date,
            "NAME" => Self::Name,
            "ADDRESS" => Self::Address,
            "ORGANIZATION" => Self::Organization,
            "CONTACT" => Self::Contact,
            "IDENTIFICATION" => Self::Identification,
            "FINANCIAL" => Self::Financial,
            "BANK_ACCOUNT" => Self::BankAccount,
            "MEDICAL_INFO" => Self::MedicalInfo,
            "PERSONAL" => Self::Personal,
            "ID_NUMBER" => Self::IdNumber,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for PiiType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<PiiType> for String {
    fn from(value: PiiType) -> Self {
        value.label().into_owned()
    }
}

impl fmt::Display for PiiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Provenance of a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionMethod {
    /// Phase 1 pattern catalog match
    #[serde(rename = "regex")]
    Regex,
    /// Title, introduction, signature, greeting or possessive name capture
    #[serde(rename = "NER")]
    Ner,
    /// Phrase-anchored capture ("call me at", "account number", ...)
    #[serde(rename = "contextual")]
    Contextual,
    /// Capitalization and organization-suffix shapes
    #[serde(rename = "semantic")]
    Semantic,
    /// Issuer prefix plus Luhn checksum
    #[serde(rename = "luhn_algorithm")]
    LuhnAlgorithm,
    /// Digit run near a banking keyword
    #[serde(rename = "contextual_numeric")]
    ContextualNumeric,
    /// Patient id / diagnosis captures
    #[serde(rename = "medical_context")]
    MedicalContext,
    /// Identifier-shaped token
    #[serde(rename = "pattern")]
    Pattern,
}

impl DetectionMethod {
    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regex => "regex",
            Self::Ner => "NER",
            Self::Contextual => "contextual",
            Self::Semantic => "semantic",
            Self::LuhnAlgorithm => "luhn_algorithm",
            Self::ContextualNumeric => "contextual_numeric",
            Self::MedicalContext => "medical_context",
            Self::Pattern => "pattern",
        }
    }

    /// Whether the method belongs to the heuristic phase
    pub fn is_heuristic(&self) -> bool {
        !matches!(self, Self::Regex)
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-grouping emitted by phrase-anchored heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextCategory {
    Identity,
    Contact,
    Personal,
    Identification,
    Financial,
}

/// One candidate or accepted finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// PII type
    #[serde(rename = "type")]
    pub pii_type: PiiType,
    /// Verbatim matched substring
    pub original: String,
    /// Placeholder token, empty until allocated
    #[serde(default)]
    pub replacement: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f64,
    /// Detection method used
    pub method: DetectionMethod,
    /// Surrounding text window for review
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Contextual sub-grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ContextCategory>,
}

impl Detection {
    /// Create a new unallocated candidate
    pub fn new(
        pii_type: PiiType,
        original: impl Into<String>,
        confidence: f64,
        method: DetectionMethod,
    ) -> Self {
        Self {
            pii_type,
            original: original.into(),
            replacement: String::new(),
            confidence: confidence.clamp(0.0, 1.0),
            method,
            context: None,
            category: None,
        }
    }

    /// Attach a review context window
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = if context.is_empty() { None } else { Some(context) };
        self
    }

    /// Attach a contextual category
    pub fn with_category(mut self, category: ContextCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the confidence score
    pub fn set_confidence(&mut self, confidence: f64) {
        self.confidence = confidence.clamp(0.0, 1.0);
    }

    /// Deduplication and feedback key: lower-cased text plus type
    pub fn key(&self) -> (String, PiiType) {
        (normalize(&self.original), self.pii_type.clone())
    }
}

/// Normalize text for keying: trimmed and lower-cased
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Per-call processing options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOptions {
    /// Run the heuristic phase
    pub ml_enabled: bool,
    /// Minimum confidence for heuristic detections
    pub confidence_threshold: f64,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            ml_enabled: true,
            confidence_threshold: 0.7,
        }
    }
}

/// Output of one processing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    /// Text with every accepted detection substituted
    pub processed_text: String,
    /// Detections, sorted by descending confidence
    #[serde(rename = "detectedPII")]
    pub detected_pii: Vec<Detection>,
    /// Snapshot of original -> placeholder mappings
    pub mappings: BTreeMap<String, String>,
    /// Number of detections
    pub total_detections: usize,
    /// Number of heuristic-phase detections
    pub ml_detections_count: usize,
}

impl ProcessResult {
    /// Assemble a result, sorting detections by descending confidence
    ///
    /// The sort is stable so equal-confidence detections keep discovery order.
    pub fn new(
        processed_text: String,
        mut detected_pii: Vec<Detection>,
        mappings: BTreeMap<String, String>,
    ) -> Self {
        detected_pii.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        let total_detections = detected_pii.len();
        let ml_detections_count = detected_pii
            .iter()
            .filter(|d| d.method.is_heuristic())
            .count();

        Self {
            processed_text,
            detected_pii,
            mappings,
            total_detections,
            ml_detections_count,
        }
    }

    /// Empty-but-valid result for empty input
    pub fn empty(mappings: BTreeMap<String, String>) -> Self {
        Self::new(String::new(), Vec::new(), mappings)
    }

    /// Check if any PII was detected
    pub fn has_detections(&self) -> bool {
        !self.detected_pii.is_empty()
    }
}
