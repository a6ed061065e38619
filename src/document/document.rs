//! The finished, flat document handed to the search engine.

use serde::{Deserialize, Serialize};

use crate::document::field::FieldRecord;

fn default_boost() -> f32 {
    1.0
}

/// A flat set of field records plus a document-level boost.
///
/// Field order carries no meaning; a field name may repeat once per value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// Identity of the source item.
    pub id: String,

    /// Collected field records.
    pub fields: Vec<FieldRecord>,

    /// Document-level relevance multiplier.
    #[serde(default = "default_boost")]
    pub boost: f32,
}

impl IndexDocument {
    /// Create a new empty document with the default boost.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
            boost: default_boost(),
        }
    }

    /// All records with the given name.
    pub fn fields_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a FieldRecord> + use<'a, 'n> {
        self.fields.iter().filter(move |f| f.name == name)
    }

    /// Values of all records with the given name.
    pub fn values_of(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.name == name)
            .map(|f| f.value.as_str())
            .collect()
    }

    /// Check if the document has at least one record with this name.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Get the number of field records.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document has no field records.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
