//! Value model for content flowing into the document builder.
//!
//! A raw value is classified exactly once when it enters the pipeline:
//! [`FieldInput::Single`] or [`FieldInput::Multi`]. A string is always a
//! single value, never a sequence of characters.
//!
//! ```
//! use docweave::document::value::{FieldInput, IndexValue};
//!
//! let tags = FieldInput::from(vec!["red", "blue"]);
//! assert!(tags.is_multi());
//!
//! let title = FieldInput::from("Hello");
//! assert_eq!(title.as_single(), Some(&IndexValue::Text("Hello".to_string())));
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single scalar value.
///
/// Deserializes untagged, so plain JSON maps naturally: `null`, booleans,
/// integers, floats, RFC3339 timestamps, then any other string.
///
/// Any JSON string that parses as an RFC3339 timestamp becomes
/// [`IndexValue::DateTime`], whatever the declared type of its field, and is
/// written with the formatter's date pattern (including its copy into the
/// content field). Build the value as [`IndexValue::Text`] in code to keep such
/// a string verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum IndexValue {
    /// Absent value. Never produces a field record.
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    DateTime(DateTime<Utc>),
    Text(String),
}

impl IndexValue {
    pub fn is_null(&self) -> bool {
        matches!(self, IndexValue::Null)
    }

    /// Borrow the text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            IndexValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short type label used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            IndexValue::Null => "null",
            IndexValue::Boolean(_) => "boolean",
            IndexValue::Integer(_) => "integer",
            IndexValue::Float(_) => "float",
            IndexValue::DateTime(_) => "datetime",
            IndexValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for IndexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexValue::Null => Ok(()),
            IndexValue::Boolean(b) => write!(f, "{b}"),
            IndexValue::Integer(i) => write!(f, "{i}"),
            IndexValue::Float(v) => write!(f, "{v}"),
            IndexValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            IndexValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for IndexValue {
    fn from(value: &str) -> Self {
        IndexValue::Text(value.to_string())
    }
}

impl From<String> for IndexValue {
    fn from(value: String) -> Self {
        IndexValue::Text(value)
    }
}

impl From<bool> for IndexValue {
    fn from(value: bool) -> Self {
        IndexValue::Boolean(value)
    }
}

impl From<i64> for IndexValue {
    fn from(value: i64) -> Self {
        IndexValue::Integer(value)
    }
}

impl From<i32> for IndexValue {
    fn from(value: i32) -> Self {
        IndexValue::Integer(value.into())
    }
}

impl From<f64> for IndexValue {
    fn from(value: f64) -> Self {
        IndexValue::Float(value)
    }
}

impl From<DateTime<Utc>> for IndexValue {
    fn from(value: DateTime<Utc>) -> Self {
        IndexValue::DateTime(value)
    }
}

impl<T: Into<IndexValue>> From<Option<T>> for IndexValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(IndexValue::Null, Into::into)
    }
}

/// A value as presented to the builder: one scalar or a sequence of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Multi(Vec<IndexValue>),
    Single(IndexValue),
}

impl FieldInput {
    pub fn null() -> Self {
        FieldInput::Single(IndexValue::Null)
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, FieldInput::Multi(_))
    }

    pub fn as_single(&self) -> Option<&IndexValue> {
        match self {
            FieldInput::Single(value) => Some(value),
            FieldInput::Multi(_) => None,
        }
    }

    /// The contained values, one element for a single value.
    pub fn values(&self) -> &[IndexValue] {
        match self {
            FieldInput::Single(value) => std::slice::from_ref(value),
            FieldInput::Multi(values) => values,
        }
    }

    /// Apply `f` to every contained value, keeping the single/multi shape.
    pub fn map<F>(self, mut f: F) -> FieldInput
    where
        F: FnMut(IndexValue) -> IndexValue,
    {
        match self {
            FieldInput::Single(value) => FieldInput::Single(f(value)),
            FieldInput::Multi(values) => FieldInput::Multi(values.into_iter().map(f).collect()),
        }
    }
}

impl Default for FieldInput {
    fn default() -> Self {
        FieldInput::null()
    }
}

impl IntoIterator for FieldInput {
    type Item = IndexValue;
    type IntoIter = std::vec::IntoIter<IndexValue>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            FieldInput::Single(value) => vec![value].into_iter(),
            FieldInput::Multi(values) => values.into_iter(),
        }
    }
}

impl From<IndexValue> for FieldInput {
    fn from(value: IndexValue) -> Self {
        FieldInput::Single(value)
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        FieldInput::Single(value.into())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        FieldInput::Single(value.into())
    }
}

impl From<bool> for FieldInput {
    fn from(value: bool) -> Self {
        FieldInput::Single(value.into())
    }
}

impl From<i64> for FieldInput {
    fn from(value: i64) -> Self {
        FieldInput::Single(value.into())
    }
}

impl From<f64> for FieldInput {
    fn from(value: f64) -> Self {
        FieldInput::Single(value.into())
    }
}

impl<T: Into<IndexValue>> From<Vec<T>> for FieldInput {
    fn from(values: Vec<T>) -> Self {
        FieldInput::Multi(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_single() {
        let input = FieldInput::from("a,b,c");
        assert!(!input.is_multi());
        assert_eq!(input.values().len(), 1);
    }

    #[test]
    fn test_json_classification() {
        let input: FieldInput = serde_json::from_str(r#"["red", "blue", null]"#).unwrap();
        assert_eq!(
            input,
            FieldInput::Multi(vec![
                IndexValue::Text("red".into()),
                IndexValue::Text("blue".into()),
                IndexValue::Null,
            ])
        );

        let input: FieldInput = serde_json::from_str("42").unwrap();
        assert_eq!(input, FieldInput::Single(IndexValue::Integer(42)));

        let input: FieldInput = serde_json::from_str("2.5").unwrap();
        assert_eq!(input, FieldInput::Single(IndexValue::Float(2.5)));

        let input: FieldInput = serde_json::from_str("null").unwrap();
        assert_eq!(input, FieldInput::null());

        let input: FieldInput = serde_json::from_str(r#""2024-05-01T10:00:00Z""#).unwrap();
        assert!(matches!(input, FieldInput::Single(IndexValue::DateTime(_))));
    }

    #[test]
    fn test_timestamp_shaped_text_becomes_date() {
        let value: IndexValue = serde_json::from_str(r#""2024-05-01T10:00:00Z""#).unwrap();
        assert_eq!(value.type_name(), "datetime");

        let value: IndexValue = serde_json::from_str(r#""2024-05-01""#).unwrap();
        assert_eq!(value, IndexValue::from("2024-05-01"));

        let value: IndexValue = serde_json::from_str(r#""Released 2024-05-01T10:00:00Z""#).unwrap();
        assert_eq!(value.type_name(), "text");
    }

    #[test]
    fn test_display() {
        assert_eq!(IndexValue::Null.to_string(), "");
        assert_eq!(IndexValue::Integer(7).to_string(), "7");
        assert_eq!(IndexValue::Boolean(false).to_string(), "false");
        assert_eq!(IndexValue::from("x").to_string(), "x");
    }

    #[test]
    fn test_map_keeps_shape() {
        let upper = |v: IndexValue| match v {
            IndexValue::Text(s) => IndexValue::Text(s.to_uppercase()),
            other => other,
        };
        let multi = FieldInput::from(vec!["a", "b"]).map(upper);
        assert_eq!(multi, FieldInput::from(vec!["A", "B"]));

        let single = FieldInput::from("a").map(upper);
        assert_eq!(single, FieldInput::from("A"));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(IndexValue::from(None::<&str>), IndexValue::Null);
        assert_eq!(IndexValue::from(Some(3i64)), IndexValue::Integer(3));
    }
}
