//! Materialization of configured values into field records.

use crate::config::field_config::FieldConfiguration;
use crate::document::field::{FieldRecord, Store};
use crate::document::value::IndexValue;
use crate::indexing::formatter::ValueFormatter;

/// Turns a formatted value plus its configuration into at most one record.
pub trait FieldFactory: Send + Sync {
    /// `None` means the value is not indexable under this configuration.
    fn create_field(
        &self,
        name: &str,
        value: IndexValue,
        config: &FieldConfiguration,
        formatter: &dyn ValueFormatter,
    ) -> Option<FieldRecord>;
}

/// Formats through the storage formatter and copies the configured policies.
///
/// Null values, empty strings and fields that would be neither stored nor
/// indexed produce no record.
#[derive(Debug, Clone, Default)]
pub struct DefaultFieldFactory;

impl DefaultFieldFactory {
    pub fn new() -> Self {
        Self
    }
}

impl FieldFactory for DefaultFieldFactory {
    fn create_field(
        &self,
        name: &str,
        value: IndexValue,
        config: &FieldConfiguration,
        formatter: &dyn ValueFormatter,
    ) -> Option<FieldRecord> {
        if config.store == Store::No && !config.index.is_indexed() {
            return None;
        }

        let formatted = formatter.format_value_for_index_storage(value, name);
        if formatted.is_null() {
            return None;
        }

        let text = formatted.to_string();
        if text.is_empty() {
            return None;
        }

        Some(FieldRecord::new(
            name,
            text,
            config.store,
            config.index,
            config.term_vector,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::field::{IndexMode, TermVector};
    use crate::indexing::formatter::DefaultValueFormatter;

    #[test]
    fn test_creates_configured_record() {
        let factory = DefaultFieldFactory::new();
        let config = FieldConfiguration::new(
            Store::Yes,
            IndexMode::Untokenized,
            TermVector::WithPositions,
            4.0,
        );

        let record = factory
            .create_field("year", IndexValue::Integer(2024), &config, &DefaultValueFormatter::new())
            .unwrap();
        assert_eq!(record.name, "year");
        assert_eq!(record.value, "2024");
        assert_eq!(record.store, Store::Yes);
        assert_eq!(record.index, IndexMode::Untokenized);
        assert_eq!(record.term_vector, TermVector::WithPositions);
    }

    #[test]
    fn test_skips_unindexable_values() {
        let factory = DefaultFieldFactory::new();
        let formatter = DefaultValueFormatter::new();
        let config = FieldConfiguration::default();

        assert!(factory
            .create_field("a", IndexValue::Null, &config, &formatter)
            .is_none());
        assert!(factory
            .create_field("a", IndexValue::from(""), &config, &formatter)
            .is_none());

        let inert = FieldConfiguration::new(Store::No, IndexMode::No, TermVector::No, 1.0);
        assert!(factory
            .create_field("a", IndexValue::from("x"), &inert, &formatter)
            .is_none());
    }
}
