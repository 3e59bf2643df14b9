//! Placeholder allocation
//!
//! Placeholders are rendered as `[TYPE_n]` or, with confidence rendering
//! enabled, `[TYPE_n_NN%]`. The per-type counter `n` starts at 1 and only
//! ever increases, so a placeholder is never handed out twice by the same
//! allocator even after its original has been removed from the mapping.

use crate::deidentify::models::PiiType;
use std::collections::HashMap;

/// Per-type counter placeholder allocator
#[derive(Debug, Clone)]
pub struct PlaceholderAllocator {
    /// Counter for each PII type
    counters: HashMap<PiiType, usize>,
    /// Render the `_NN%` confidence suffix when a confidence is supplied
    include_confidence: bool,
}

impl PlaceholderAllocator {
    /// Create a new allocator
    pub fn new(include_confidence: bool) -> Self {
        Self {
            counters: HashMap::new(),
            include_confidence,
        }
    }

    /// Allocate the next placeholder for `pii_type`
    pub fn allocate(&mut self, pii_type: &PiiType, confidence: Option<f64>) -> String {
        let include_confidence = self.include_confidence;
        let counter = self.counters.entry(pii_type.clone()).or_insert(0);
        *counter += 1;

        match confidence.filter(|_| include_confidence) {
            Some(confidence) => format!(
                "[{}_{}_{}%]",
                pii_type.label(),
                counter,
                (confidence.clamp(0.0, 1.0) * 100.0).round() as u32
            ),
            None => format!("[{}_{}]", pii_type.label(), counter),
        }
    }

    /// Current counter value for `pii_type` (0 if never allocated)
    pub fn counter(&self, pii_type: &PiiType) -> usize {
        self.counters.get(pii_type).copied().unwrap_or(0)
    }

    /// Advance counters past an existing placeholder
    ///
    /// Used when mappings are restored from a saved session so new
    /// allocations cannot collide with restored ones. Tokens that do not
    /// parse as placeholders are ignored.
    pub fn observe(&mut self, placeholder: &str) {
        if let Some((pii_type, n)) = parse_placeholder(placeholder) {
            let counter = self.counters.entry(pii_type).or_insert(0);
            *counter = (*counter).max(n);
        }
    }

    /// Clear all counters
    pub fn reset(&mut self) {
        self.counters.clear();
    }
}

impl Default for PlaceholderAllocator {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Parse `[TYPE_n]` or `[TYPE_n_NN%]` into its type and counter
pub fn parse_placeholder(token: &str) -> Option<(PiiType, usize)> {
    let inner = token.strip_prefix('[')?.strip_suffix(']')?;
    let inner = match inner.strip_suffix('%') {
        Some(rest) => {
            let (head, percent) = rest.rsplit_once('_')?;
            if percent.is_empty() || !percent.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            head
        }
        None => inner,
    };
    let (label, counter) = inner.rsplit_once('_')?;
    let label_ok = label.starts_with(|c: char| c.is_ascii_uppercase())
        && label
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_');
    if !label_ok {
        return None;
    }
    let counter = counter.parse().ok()?;
    Some((PiiType::from(label), counter))
}

/// Whether `text` holds at least one placeholder token
pub fn contains_placeholder(text: &str) -> bool {
    text.match_indices('[').any(|(start, _)| {
        text[start..]
            .find(']')
            .and_then(|close| parse_placeholder(&text[start..=start + close]))
            .is_some()
    })
}
