//! Reading declared data field values and classifying text fields.

use ahash::AHashSet;
use regex::Regex;

use crate::document::indexable::DataField;
use crate::document::value::{FieldInput, IndexValue};
use crate::error::{DocweaveError, Result};

/// Type keys treated as text by [`TypeKeyTextClassifier::new`].
pub const DEFAULT_TEXT_TYPES: &[&str] = &[
    "text",
    "single-line text",
    "multi-line text",
    "rich text",
    "html",
    "memo",
];

/// Type keys whose values carry markup, stripped by [`DefaultFieldReader::new`].
pub const DEFAULT_HTML_TYPES: &[&str] = &["rich text", "html"];

fn key_set<I, S>(keys: I) -> AHashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .collect()
}

/// Reads the indexable value of a declared data field.
pub trait FieldReader: Send + Sync {
    fn field_value(&self, field: &DataField) -> FieldInput;
}

/// Returns the raw value, stripping tags from markup-bearing field types.
#[derive(Debug, Clone)]
pub struct DefaultFieldReader {
    html_types: AHashSet<String>,
    tags: Regex,
}

impl DefaultFieldReader {
    pub fn new() -> Result<Self> {
        Self::with_html_types(DEFAULT_HTML_TYPES)
    }

    /// Strip markup from the given type keys only.
    pub fn with_html_types<I, S>(types: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            html_types: key_set(types),
            tags: Regex::new(r"<[^>]*>")
                .map_err(|e| DocweaveError::config(format!("invalid markup pattern: {e}")))?,
        })
    }

    fn strip(&self, value: IndexValue) -> IndexValue {
        match value {
            IndexValue::Text(s) => {
                let stripped = self.tags.replace_all(&s, " ");
                IndexValue::Text(stripped.split_whitespace().collect::<Vec<_>>().join(" "))
            }
            other => other,
        }
    }
}

impl FieldReader for DefaultFieldReader {
    fn field_value(&self, field: &DataField) -> FieldInput {
        if self.html_types.contains(&field.type_key.trim().to_lowercase()) {
            field.value.clone().map(|v| self.strip(v))
        } else {
            field.value.clone()
        }
    }
}

/// Decides whether a declared field holds free text.
pub trait TextFieldClassifier: Send + Sync {
    fn is_text_field(&self, field: &DataField) -> bool;
}

/// Classifies by type key, ignoring case.
///
/// ```
/// use docweave::document::indexable::DataField;
/// use docweave::indexing::reader::{TextFieldClassifier, TypeKeyTextClassifier};
///
/// let classifier = TypeKeyTextClassifier::new();
/// assert!(classifier.is_text_field(&DataField::new("Body", "Rich Text", "<p>x</p>")));
/// assert!(!classifier.is_text_field(&DataField::new("Count", "integer", 3i64)));
/// ```
#[derive(Debug, Clone)]
pub struct TypeKeyTextClassifier {
    text_types: AHashSet<String>,
}

impl TypeKeyTextClassifier {
    pub fn new() -> Self {
        Self::with_types(DEFAULT_TEXT_TYPES)
    }

    pub fn with_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            text_types: key_set(types),
        }
    }
}

impl Default for TypeKeyTextClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFieldClassifier for TypeKeyTextClassifier {
    fn is_text_field(&self, field: &DataField) -> bool {
        self.text_types.contains(&field.type_key.trim().to_lowercase())
    }
}
