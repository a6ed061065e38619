//! Conversion of raw values into index-storage primitives.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::document::value::IndexValue;
use crate::error::{DocweaveError, Result};

/// Default pattern for dates in index storage.
pub const DEFAULT_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Check that a chrono pattern contains only known specifiers.
pub fn check_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(DocweaveError::config(format!(
            "invalid date format pattern: {format:?}"
        )));
    }
    Ok(())
}

/// Render a date with a chrono pattern. `None` when the pattern cannot be rendered.
pub fn format_date(date: &DateTime<Utc>, format: &str) -> Option<String> {
    let mut text = String::new();
    write!(text, "{}", date.format(format)).ok()?;
    Some(text)
}

/// Converts a raw value into the form the index stores.
///
/// Returning [`IndexValue::Null`] means the value cannot be indexed.
pub trait ValueFormatter: Send + Sync {
    fn format_value_for_index_storage(&self, value: IndexValue, field_name: &str) -> IndexValue;
}

/// Keeps text and numbers, writes booleans as `true`/`false` and dates with a
/// sortable pattern.
#[derive(Debug, Clone)]
pub struct DefaultValueFormatter {
    date_format: String,
}

impl DefaultValueFormatter {
    pub fn new() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Use a custom chrono pattern for dates.
    pub fn with_date_format<S: Into<String>>(mut self, format: S) -> Self {
        self.date_format = format.into();
        self
    }
}

impl Default for DefaultValueFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueFormatter for DefaultValueFormatter {
    fn format_value_for_index_storage(&self, value: IndexValue, _field_name: &str) -> IndexValue {
        match value {
            IndexValue::Boolean(b) => IndexValue::Text(b.to_string()),
            IndexValue::DateTime(dt) => match format_date(&dt, &self.date_format) {
                Some(text) => IndexValue::Text(text),
                None => IndexValue::Null,
            },
            other => other,
        }
    }
}
