//! Field map: resolves the configuration that applies to a field.
//!
//! Lookups are case-insensitive. A declared data field resolves by its name
//! first and falls back to its type key, so a whole family of fields (every
//! `"date"` field, say) can share one entry.

use std::collections::HashMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::config::field_config::FieldConfiguration;
use crate::document::indexable::DataField;

/// Source of field configuration.
pub trait FieldMap: Send + Sync {
    /// Configuration registered for a field name, if any.
    fn configuration_for_name(&self, name: &str) -> Option<&FieldConfiguration>;

    /// Configuration for a declared data field, if any.
    fn configuration_for_field(&self, field: &DataField) -> Option<&FieldConfiguration>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawFieldMap {
    #[serde(default)]
    fields: HashMap<String, FieldConfiguration>,

    #[serde(default)]
    types: HashMap<String, FieldConfiguration>,
}

/// A field map backed by two tables: by field name and by type key.
///
/// # Example
///
/// ```
/// use docweave::config::field_config::FieldConfiguration;
/// use docweave::config::field_map::{FieldMap, FieldMapConfig};
///
/// let mut map = FieldMapConfig::new();
/// map.add_field("Title", FieldConfiguration::default().with_boost(2.0));
///
/// assert_eq!(map.configuration_for_name("title").map(|c| c.boost), Some(2.0));
/// assert!(map.configuration_for_name("body").is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawFieldMap", into = "RawFieldMap")]
pub struct FieldMapConfig {
    fields: AHashMap<String, FieldConfiguration>,
    types: AHashMap<String, FieldConfiguration>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl FieldMapConfig {
    /// All registered configurations, by name and by type key.
    pub fn configurations(&self) -> impl Iterator<Item = (&str, &FieldConfiguration)> {
        self.fields
            .iter()
            .chain(self.types.iter())
            .map(|(key, config)| (key.as_str(), config))
    }

    /// Create a new empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a configuration for a field name.
    pub fn add_field(&mut self, name: &str, config: FieldConfiguration) {
        self.fields.insert(key(name), config);
    }

    /// Register a configuration for every field of a type.
    pub fn add_type(&mut self, type_key: &str, config: FieldConfiguration) {
        self.types.insert(key(type_key), config);
    }

    /// Builder-style [`FieldMapConfig::add_field`].
    pub fn with_field(mut self, name: &str, config: FieldConfiguration) -> Self {
        self.add_field(name, config);
        self
    }

    /// Builder-style [`FieldMapConfig::add_type`].
    pub fn with_type(mut self, type_key: &str, config: FieldConfiguration) -> Self {
        self.add_type(type_key, config);
        self
    }

    /// Number of field-name entries.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of type-key entries.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl FieldMap for FieldMapConfig {
    fn configuration_for_name(&self, name: &str) -> Option<&FieldConfiguration> {
        self.fields.get(&key(name))
    }

    fn configuration_for_field(&self, field: &DataField) -> Option<&FieldConfiguration> {
        self.configuration_for_name(&field.name)
            .or_else(|| self.types.get(&key(&field.type_key)))
    }
}

impl From<RawFieldMap> for FieldMapConfig {
    fn from(raw: RawFieldMap) -> Self {
        let mut map = FieldMapConfig::new();
        for (name, config) in raw.fields {
            map.add_field(&name, config);
        }
        for (type_key, config) in raw.types {
            map.add_type(&type_key, config);
        }
        map
    }
}

impl From<FieldMapConfig> for RawFieldMap {
    fn from(map: FieldMapConfig) -> Self {
        RawFieldMap {
            fields: map.fields.into_iter().collect(),
            types: map.types.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::field::{IndexMode, Store};

    #[test]
    fn test_lookup_by_name_and_type() {
        let map = FieldMapConfig::new()
            .with_field("Title", FieldConfiguration::default().with_boost(3.0))
            .with_type(
                "Date",
                FieldConfiguration::default().with_boost(0.5),
            );

        let title = DataField::new("title", "single-line text", "x");
        assert_eq!(map.configuration_for_field(&title).map(|c| c.boost), Some(3.0));

        let created = DataField::new("Created", "date", "x");
        assert_eq!(map.configuration_for_field(&created).map(|c| c.boost), Some(0.5));

        let other = DataField::new("Other", "number", "x");
        assert!(map.configuration_for_field(&other).is_none());

        // Type keys never match plain name lookups.
        assert!(map.configuration_for_name("date").is_none());
    }

    #[test]
    fn test_deserialize_normalizes_keys() {
        let map: FieldMapConfig = serde_json::from_str(
            r#"{
                "fields": {"  Page Title ": {"store": "YES", "index": "UNTOKENIZED"}},
                "types": {"Rich Text": {"boost": 1.5}}
            }"#,
        )
        .unwrap();

        let config = map.configuration_for_name("page title").unwrap();
        assert_eq!(config.store, Store::Yes);
        assert_eq!(config.index, IndexMode::Untokenized);
        assert_eq!(map.type_count(), 1);
        assert_eq!(map.field_count(), 1);
    }
}
