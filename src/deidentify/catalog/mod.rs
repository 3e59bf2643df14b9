//! Pattern catalog for phase 1 detection
//!
//! The catalog is an ordered list of labelled regular expressions loaded from
//! a TOML pattern library. Order is significant: the engine substitutes each
//! pattern's matches before running the next one, so the first pattern to
//! claim a substring wins.

use crate::deidentify::heuristics::financial::is_valid_luhn;
use crate::deidentify::models::PiiType;
use anyhow::{Context, Result};
use fancy_regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::path::Path;

/// Backtracking budget for patterns that need the backtracking VM
const BACKTRACK_LIMIT: usize = 100_000;

/// Post-match validation applied to a pattern's hits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// Digits must pass the Luhn checksum
    Luhn,
}

impl Validator {
    fn accepts(&self, matched: &str) -> bool {
        match self {
            Self::Luhn => is_valid_luhn(matched),
        }
    }
}

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Identifier used in logs
    pub name: String,
    /// PII type label
    pub label: String,
    /// Regex source
    pub regex: String,
    /// Match case-insensitively
    #[serde(default)]
    pub case_insensitive: bool,
    /// Optional post-match validator
    #[serde(default)]
    pub validator: Option<Validator>,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: Vec<PatternDefinition>,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Identifier used in logs
    pub name: String,
    /// PII type assigned to matches
    pub pii_type: PiiType,
    regex: Regex,
    validator: Option<Validator>,
}

/// One hit of a catalog pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch<'t> {
    /// PII type of the pattern that matched
    pub pii_type: PiiType,
    /// Matched substring
    pub text: &'t str,
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset of the match end
    pub end: usize,
}

impl CompiledPattern {
    /// Compile a pattern definition
    pub fn compile(def: &PatternDefinition) -> Result<Self> {
        let source = if def.case_insensitive {
            format!("(?i){}", def.regex)
        } else {
            def.regex.clone()
        };

        let mut builder = RegexBuilder::new(&source);
        builder.backtrack_limit(BACKTRACK_LIMIT);
        let regex = builder
            .build()
            .with_context(|| format!("Invalid regex in pattern '{}': {}", def.name, def.regex))?;

        Ok(Self {
            name: def.name.clone(),
            pii_type: PiiType::from(def.label.as_str()),
            regex,
            validator: def.validator,
        })
    }

    /// Lazily yield all non-overlapping, validated matches in `text`
    ///
    /// A runtime matching failure (backtrack budget exhausted) ends the
    /// iteration for this pattern; it is logged, not returned.
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = PatternMatch<'a>> + 'a {
        self.regex
            .find_iter(text)
            .map_while(move |found| match found {
                Ok(m) => Some(m),
                Err(e) => {
                    tracing::warn!(
                        pattern = %self.name,
                        error = %e,
                        "Pattern matching aborted, skipping remaining matches"
                    );
                    None
                }
            })
            .filter(move |m| self.accepts(m.as_str()))
            .map(move |m| PatternMatch {
                pii_type: self.pii_type.clone(),
                text: m.as_str(),
                start: m.start(),
                end: m.end(),
            })
    }

    fn accepts(&self, matched: &str) -> bool {
        self.validator.map_or(true, |v| v.accepts(matched))
    }
}

/// Non-mutating highlight span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    pub pii_type: PiiType,
    pub text: String,
}

/// Ordered pattern catalog
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    patterns: Vec<CompiledPattern>,
}

impl PatternCatalog {
    /// Load a catalog from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Load a catalog from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let patterns = library
            .patterns
            .iter()
            .map(CompiledPattern::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Built-in catalog
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// Drop every pattern whose label is listed (case-insensitive)
    pub fn without_labels(mut self, labels: &[String]) -> Self {
        if labels.is_empty() {
            return self;
        }
        let disabled: Vec<PiiType> = labels.iter().map(|l| PiiType::from(l.as_str())).collect();
        self.patterns.retain(|p| !disabled.contains(&p.pii_type));
        self
    }

    /// Patterns in declaration order
    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Lazily scan `text` with every pattern, in catalog order
    ///
    /// Each pattern sees the same unmodified text; callers that substitute
    /// between patterns should drive [`CompiledPattern::matches`] directly.
    pub fn scan<'a>(&'a self, text: &'a str) -> impl Iterator<Item = PatternMatch<'a>> + 'a {
        self.patterns.iter().flat_map(move |p| p.matches(text))
    }

    /// Report every match position without substituting, sorted by start offset
    pub fn highlight(&self, text: &str) -> Vec<Highlight> {
        let mut highlights: Vec<Highlight> = self
            .scan(text)
            .map(|m| Highlight {
                start: m.start,
                end: m.end,
                pii_type: m.pii_type,
                text: m.text.to_string(),
            })
            .collect();
        highlights.sort_by_key(|h| h.start);
        highlights
    }
}
