//! Per-field indexing configuration.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::field::{IndexMode, Store, TermVector};
use crate::document::value::{FieldInput, IndexValue};
use crate::error;
use crate::indexing::formatter::{check_date_format, format_date};

/// Name of the reserved full-text field that collects text content.
pub const CONTENT_FIELD: &str = "content";

/// A compiled regular expression that round-trips through config files as its source.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Pattern)
    }

    pub fn as_regex(&self) -> &Regex {
        &self.0
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.0.as_str())
    }
}

impl Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pattern::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Per-value formatting applied before a value is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FormatRule {
    Lowercase,
    Uppercase,
    Trim,
    /// Regex replace on text values.
    Replace { pattern: Pattern, replacement: String },
    /// Render date values with a chrono format string.
    DateFormat { format: String },
}

impl FormatRule {
    /// Apply the rule to one value. Values the rule does not target pass through.
    pub fn apply(&self, value: IndexValue) -> IndexValue {
        match (self, value) {
            (FormatRule::Lowercase, IndexValue::Text(s)) => IndexValue::Text(s.to_lowercase()),
            (FormatRule::Uppercase, IndexValue::Text(s)) => IndexValue::Text(s.to_uppercase()),
            (FormatRule::Trim, IndexValue::Text(s)) => IndexValue::Text(s.trim().to_string()),
            (FormatRule::Replace { pattern, replacement }, IndexValue::Text(s)) => IndexValue::Text(
                pattern
                    .as_regex()
                    .replace_all(&s, replacement.as_str())
                    .into_owned(),
            ),
            (FormatRule::DateFormat { format }, IndexValue::DateTime(dt)) => {
                format_date(&dt, format).map_or(IndexValue::Null, IndexValue::Text)
            }
            (_, other) => other,
        }
    }

    /// Reject rules that would fail on every value they target.
    pub fn validate(&self) -> error::Result<()> {
        match self {
            FormatRule::DateFormat { format } => check_date_format(format),
            _ => Ok(()),
        }
    }
}

fn default_boost() -> f32 {
    1.0
}

/// Storage, analysis and formatting rules for one field.
///
/// # Example
///
/// ```
/// use docweave::config::field_config::FieldConfiguration;
/// use docweave::document::field::{IndexMode, Store};
///
/// let config: FieldConfiguration = serde_json::from_str(
///     r#"{"store": "YES", "index": "UNTOKENIZED", "boost": 2.0, "format": {"rule": "lowercase"}}"#,
/// ).unwrap();
/// assert_eq!(config.store, Store::Yes);
/// assert_eq!(config.index, IndexMode::Untokenized);
/// assert_eq!(config.boost, 2.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfiguration {
    #[serde(default)]
    pub store: Store,

    #[serde(default)]
    pub index: IndexMode,

    #[serde(default)]
    pub term_vector: TermVector,

    #[serde(default = "default_boost")]
    pub boost: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatRule>,
}

impl FieldConfiguration {
    /// Create a new configuration without a format rule.
    pub fn new(store: Store, index: IndexMode, term_vector: TermVector, boost: f32) -> Self {
        Self {
            store,
            index,
            term_vector,
            boost,
            format: None,
        }
    }

    /// Fallback used for the reserved content field when it has no configuration.
    pub fn content_fallback() -> Self {
        Self::new(Store::No, IndexMode::Tokenized, TermVector::No, 1.0)
    }

    /// Set the format rule.
    pub fn with_format(mut self, rule: FormatRule) -> Self {
        self.format = Some(rule);
        self
    }

    /// Set the boost.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Format one value for writing.
    pub fn format_for_writing(&self, value: IndexValue) -> IndexValue {
        match &self.format {
            Some(rule) => rule.apply(value),
            None => value,
        }
    }

    /// Format every value of an input for writing.
    pub fn format_input(&self, input: FieldInput) -> FieldInput {
        match &self.format {
            Some(rule) => input.map(|v| rule.apply(v)),
            None => input,
        }
    }
}

impl Default for FieldConfiguration {
    fn default() -> Self {
        Self::new(Store::No, IndexMode::Tokenized, TermVector::No, 1.0)
    }
}
