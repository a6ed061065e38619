//! Document builder: turns one item into a flat set of field records.
//!
//! One [`IndexDocumentBuilder`] exists per item. Declared data fields and
//! computed values enter through the `add_*` methods, are resolved against
//! the field map, expanded when multi-valued and handed to the field
//! factory. Records accumulate in a collection that tolerates concurrent
//! appends, because computed fields may be evaluated on a worker pool.
//!
//! # Example
//!
//! ```
//! use docweave::config::field_config::FieldConfiguration;
//! use docweave::config::field_map::FieldMapConfig;
//! use docweave::document::field::Store;
//! use docweave::document::indexable::{ContentItem, DataField};
//! use docweave::indexing::builder::{DocumentBuilder, IndexDocumentBuilder};
//! use docweave::indexing::context::IndexContext;
//!
//! let context = IndexContext::builder()
//!     .field_map(FieldMapConfig::new().with_field(
//!         "title",
//!         FieldConfiguration { store: Store::Yes, boost: 2.0, ..Default::default() },
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let item = ContentItem::new("home").with_field(DataField::new("Title", "text", "Hello"));
//! let builder = IndexDocumentBuilder::new(&item, &context);
//! for field in &item.fields {
//!     builder.add_data_field(field);
//! }
//!
//! let document = builder.into_document();
//! assert_eq!(document.values_of("title"), vec!["Hello"]);
//! assert_eq!(document.values_of("content"), vec!["Hello"]);
//! ```

use log::debug;
use parking_lot::Mutex;

use crate::config::field_config::{CONTENT_FIELD, FieldConfiguration};
use crate::document::document::IndexDocument;
use crate::document::field::FieldRecord;
use crate::document::indexable::{DataField, Indexable};
use crate::document::value::FieldInput;
use crate::error::Result;
use crate::indexing::context::IndexContext;
use crate::indexing::evaluator::ComputedFieldEvaluator;

/// Entry points for assembling the field set of one item.
pub trait DocumentBuilder {
    /// Add a value under a name, resolving configuration by name. Fields
    /// without configuration are still indexed with stored/analyzed defaults.
    fn add_field(&self, name: &str, value: FieldInput);

    /// Add a declared data field. Fields without configuration are skipped.
    fn add_data_field(&self, field: &DataField);

    /// Evaluate every configured computed field and add its value.
    fn add_computed_index_fields(&self) -> Result<()>;

    /// Apply the item-level boost.
    fn add_boost(&mut self);

    /// Snapshot of the records collected so far.
    fn collected_fields(&self) -> Vec<FieldRecord>;

    /// Current document-level boost.
    fn document_boost(&self) -> f32;
}

/// The document builder.
pub struct IndexDocumentBuilder<'a> {
    item: &'a dyn Indexable,
    context: &'a IndexContext,
    fields: Mutex<Vec<FieldRecord>>,
    boost: f32,
}

impl<'a> IndexDocumentBuilder<'a> {
    /// Create a new builder for one item.
    pub fn new(item: &'a dyn Indexable, context: &'a IndexContext) -> Self {
        Self {
            item,
            context,
            fields: Mutex::new(Vec::new()),
            boost: 1.0,
        }
    }

    /// The item this builder collects fields for.
    pub fn item(&self) -> &'a dyn Indexable {
        self.item
    }

    /// The shared context of the indexing run.
    pub fn context(&self) -> &'a IndexContext {
        self.context
    }

    /// Add a value under an explicit configuration.
    ///
    /// The record boost is the configuration's boost plus `boost`. Every
    /// element of a multi-valued input is formatted and materialized on its
    /// own; an element that yields no record does not affect its siblings.
    pub fn add_configured_field(
        &self,
        name: &str,
        value: FieldInput,
        config: &FieldConfiguration,
        boost: f32,
    ) {
        let name = self.context.translator.index_field_name(name);
        let boost = config.boost + boost;

        for element in value {
            let element = config.format_for_writing(element);
            if let Some(record) = self.context.factory.create_field(
                &name,
                element,
                config,
                self.context.formatter.as_ref(),
            ) {
                self.push(record.with_boost(boost));
            }
        }
    }

    /// Route a computed value, element by element, through the configured
    /// path when the field map knows the name and the default path otherwise.
    pub(crate) fn add_computed_index_field(&self, field_name: &str, value: FieldInput) {
        let config = self.context.field_map.configuration_for_name(field_name);

        for element in value {
            match config {
                Some(config) => {
                    self.add_configured_field(field_name, FieldInput::Single(element), config, 0.0)
                }
                None => self.add_field(field_name, FieldInput::Single(element)),
            }
        }
    }

    /// Consume the builder and produce the finished document.
    pub fn into_document(self) -> IndexDocument {
        IndexDocument {
            id: self.item.unique_id().to_string(),
            fields: self.fields.into_inner(),
            boost: self.boost,
        }
    }

    fn push(&self, record: FieldRecord) {
        self.fields.lock().push(record);
    }

    fn add_unconfigured_field(
        &self,
        original_name: &str,
        index_name: &str,
        value: FieldInput,
        field_map: Option<&FieldConfiguration>,
    ) {
        debug!("Field: {index_name} (adding field with no field configuration)");
        if self.context.settings.verbose_logging {
            for element in value.values() {
                debug!(" - value type: {}, value: {element}", element.type_name());
            }
        }

        for element in value {
            let mut formatted = self
                .context
                .formatter
                .format_value_for_index_storage(element, original_name);
            if let Some(field_map) = field_map {
                formatted = field_map.format_for_writing(formatted);
            }

            if !formatted.is_null() {
                self.push(FieldRecord::analyzed_default(index_name, formatted.to_string()));
            }
        }
    }
}

impl DocumentBuilder for IndexDocumentBuilder<'_> {
    fn add_field(&self, name: &str, value: FieldInput) {
        let field_map = self.context.field_map.configuration_for_name(name);
        let index_name = self.context.translator.index_field_name(name);

        match self.context.field_map.configuration_for_name(&index_name) {
            Some(settings) => {
                let value = match field_map {
                    Some(field_map) => field_map.format_input(value),
                    None => value,
                };
                self.add_configured_field(&index_name, value, settings, 0.0);
            }
            None => self.add_unconfigured_field(name, &index_name, value, field_map),
        }
    }

    fn add_data_field(&self, field: &DataField) {
        let value = self.context.reader.field_value(field);

        let Some(settings) = self.context.field_map.configuration_for_field(field) else {
            debug!(
                "Cannot resolve field settings for field id:{}, name:{}, typeKey:{} - the field will not be added to the index",
                field.id, field.name, field.type_key
            );
            return;
        };

        let value = settings.format_input(value);
        let boost = self.context.boosting.resolve_field_boost(field);

        if self.context.classifier.is_text_field(field) {
            let fallback = FieldConfiguration::content_fallback();
            let content = self
                .context
                .field_map
                .configuration_for_name(CONTENT_FIELD)
                .unwrap_or(&fallback);
            self.add_configured_field(CONTENT_FIELD, value.clone(), content, 0.0);
        }

        self.add_configured_field(&field.name, value, settings, boost);
    }

    fn add_computed_index_fields(&self) -> Result<()> {
        ComputedFieldEvaluator::new(self).evaluate()
    }

    fn add_boost(&mut self) {
        let item_boost = self.context.boosting.resolve_item_boost(self.item);
        if item_boost > 0.0 {
            self.boost = item_boost;
        }
    }

    fn collected_fields(&self) -> Vec<FieldRecord> {
        self.fields.lock().clone()
    }

    fn document_boost(&self) -> f32 {
        self.boost
    }
}
