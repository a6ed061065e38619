//! Source items and their declared data fields.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::value::FieldInput;

/// One structured attribute of a source item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataField {
    /// Stable identifier of the field definition.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Declared field name.
    pub name: String,

    /// Type key of the field definition, e.g. `"single-line text"`.
    #[serde(default)]
    pub type_key: String,

    /// Raw value as read from the item.
    #[serde(default)]
    pub value: FieldInput,
}

impl DataField {
    /// Create a new data field with a fresh identifier.
    pub fn new<S: Into<String>, T: Into<String>, V: Into<FieldInput>>(
        name: S,
        type_key: T,
        value: V,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            type_key: type_key.into(),
            value: value.into(),
        }
    }

    /// Replace the identifier.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A content item that can be turned into an index document.
///
/// Implementations must be shareable across threads: computed fields may be
/// evaluated against the same item from several workers at once.
pub trait Indexable: Send + Sync {
    /// Identity of the item, used for diagnostics and item-level boosting.
    fn unique_id(&self) -> &str;

    /// Declared data fields in presentation order.
    fn data_fields(&self) -> &[DataField];

    /// Find a declared field by name, ignoring ASCII case.
    fn data_field(&self, name: &str) -> Option<&DataField> {
        self.data_fields()
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }
}

/// A plain item with an id and a list of fields, loadable from JSON.
///
/// ```
/// use docweave::document::indexable::{ContentItem, Indexable};
///
/// let item: ContentItem = serde_json::from_str(
///     r#"{"id": "home", "fields": [{"name": "Title", "type_key": "text", "value": "Hello"}]}"#,
/// ).unwrap();
/// assert_eq!(item.unique_id(), "home");
/// assert!(item.data_field("title").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,

    #[serde(default)]
    pub fields: Vec<DataField>,
}

impl ContentItem {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    /// Append a declared field.
    pub fn with_field(mut self, field: DataField) -> Self {
        self.fields.push(field);
        self
    }
}

impl Indexable for ContentItem {
    fn unique_id(&self) -> &str {
        &self.id
    }

    fn data_fields(&self) -> &[DataField] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::value::IndexValue;

    #[test]
    fn test_content_item_lookup() {
        let item = ContentItem::new("item-1")
            .with_field(DataField::new("Title", "single-line text", "Hello"))
            .with_field(DataField::new("Tags", "multilist", vec!["a", "b"]));

        assert_eq!(item.data_fields().len(), 2);
        assert_eq!(item.data_field("TAGS").map(|f| f.value.values().len()), Some(2));
        assert!(item.data_field("missing").is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let field: DataField = serde_json::from_str(r#"{"name": "Empty"}"#).unwrap();
        assert_eq!(field.type_key, "");
        assert_eq!(field.value.as_single(), Some(&IndexValue::Null));
    }
}
