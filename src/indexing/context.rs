//! The update context shared by every document builder of an indexing run.

use std::fmt;
use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::field_map::{FieldMap, FieldMapConfig};
use crate::config::index_config::IndexConfig;
use crate::config::settings::IndexingSettings;
use crate::error::{DocweaveError, Result};
use crate::indexing::boost::{BoostingPolicy, NoBoosting};
use crate::indexing::computed::ComputedField;
use crate::indexing::field_factory::{DefaultFieldFactory, FieldFactory};
use crate::indexing::formatter::{DefaultValueFormatter, ValueFormatter};
use crate::indexing::reader::{DefaultFieldReader, FieldReader, TextFieldClassifier, TypeKeyTextClassifier};
use crate::indexing::translator::{DefaultFieldNameTranslator, FieldNameTranslator};

/// Collaborators, settings and computed-field definitions for building documents.
///
/// Created once per run and shared behind an `Arc`; each item gets its own
/// [`IndexDocumentBuilder`](crate::indexing::builder::IndexDocumentBuilder).
pub struct IndexContext {
    pub(crate) field_map: Arc<dyn FieldMap>,
    pub(crate) translator: Arc<dyn FieldNameTranslator>,
    pub(crate) formatter: Arc<dyn ValueFormatter>,
    pub(crate) reader: Arc<dyn FieldReader>,
    pub(crate) classifier: Arc<dyn TextFieldClassifier>,
    pub(crate) factory: Arc<dyn FieldFactory>,
    pub(crate) boosting: Arc<dyn BoostingPolicy>,
    pub(crate) computed_fields: Vec<Arc<dyn ComputedField>>,
    pub(crate) settings: IndexingSettings,
    pub(crate) pool: Option<Arc<ThreadPool>>,
}

impl IndexContext {
    /// Create a new builder with default collaborators.
    pub fn builder() -> IndexContextBuilder {
        IndexContextBuilder::new()
    }

    /// Build a context from a loaded configuration file.
    pub fn from_config(config: &IndexConfig) -> Result<Self> {
        let reader = match &config.html_field_types {
            Some(types) => DefaultFieldReader::with_html_types(types)?,
            None => DefaultFieldReader::new()?,
        };
        let classifier = match &config.text_field_types {
            Some(types) => TypeKeyTextClassifier::with_types(types),
            None => TypeKeyTextClassifier::new(),
        };
        let mut formatter = DefaultValueFormatter::new();
        if let Some(format) = &config.date_format {
            formatter = formatter.with_date_format(format.clone());
        }

        let mut builder = IndexContext::builder()
            .field_map(config.field_map.clone())
            .translator(DefaultFieldNameTranslator::new().lowercase(config.lowercase_field_names))
            .formatter(formatter)
            .reader(reader)
            .classifier(classifier)
            .boosting(config.boosting.clone())
            .settings(config.settings.clone());
        for computed in &config.computed_fields {
            builder = builder.computed_field_arc(computed.build());
        }
        builder.build()
    }

    pub fn settings(&self) -> &IndexingSettings {
        &self.settings
    }

    pub fn computed_fields(&self) -> &[Arc<dyn ComputedField>] {
        &self.computed_fields
    }

    pub fn field_map(&self) -> &dyn FieldMap {
        self.field_map.as_ref()
    }

    pub fn translator(&self) -> &dyn FieldNameTranslator {
        self.translator.as_ref()
    }

    pub fn formatter(&self) -> &dyn ValueFormatter {
        self.formatter.as_ref()
    }

    pub fn boosting(&self) -> &dyn BoostingPolicy {
        self.boosting.as_ref()
    }

    /// Worker pool for parallel computed fields, present only when enabled.
    pub fn pool(&self) -> Option<&ThreadPool> {
        self.pool.as_deref()
    }
}

impl fmt::Debug for IndexContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexContext")
            .field(
                "computed_fields",
                &self
                    .computed_fields
                    .iter()
                    .map(|c| c.field_name())
                    .collect::<Vec<_>>(),
            )
            .field("settings", &self.settings)
            .field("pool_threads", &self.pool.as_ref().map(|p| p.current_num_threads()))
            .finish()
    }
}

/// Builder for [`IndexContext`].
///
/// # Example
///
/// ```
/// use docweave::config::field_map::FieldMapConfig;
/// use docweave::config::settings::IndexingSettings;
/// use docweave::indexing::computed::FieldNamesField;
/// use docweave::indexing::context::IndexContext;
///
/// let context = IndexContext::builder()
///     .field_map(FieldMapConfig::new())
///     .computed_field(FieldNamesField::new("_fields"))
///     .settings(IndexingSettings {
///         parallel_computed_fields: true,
///         max_degree_of_parallelism: Some(2),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(context.computed_fields().len(), 1);
/// assert_eq!(context.pool().map(|p| p.current_num_threads()), Some(2));
/// ```
pub struct IndexContextBuilder {
    field_map: Arc<dyn FieldMap>,
    translator: Arc<dyn FieldNameTranslator>,
    formatter: Arc<dyn ValueFormatter>,
    reader: Option<Arc<dyn FieldReader>>,
    classifier: Arc<dyn TextFieldClassifier>,
    factory: Arc<dyn FieldFactory>,
    boosting: Arc<dyn BoostingPolicy>,
    computed_fields: Vec<Arc<dyn ComputedField>>,
    settings: IndexingSettings,
}

impl IndexContextBuilder {
    pub fn new() -> Self {
        Self {
            field_map: Arc::new(FieldMapConfig::new()),
            translator: Arc::new(DefaultFieldNameTranslator::new()),
            formatter: Arc::new(DefaultValueFormatter::new()),
            reader: None,
            classifier: Arc::new(TypeKeyTextClassifier::new()),
            factory: Arc::new(DefaultFieldFactory::new()),
            boosting: Arc::new(NoBoosting),
            computed_fields: Vec::new(),
            settings: IndexingSettings::default(),
        }
    }

    pub fn field_map<M: FieldMap + 'static>(mut self, field_map: M) -> Self {
        self.field_map = Arc::new(field_map);
        self
    }

    pub fn translator<T: FieldNameTranslator + 'static>(mut self, translator: T) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    pub fn formatter<F: ValueFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    pub fn reader<R: FieldReader + 'static>(mut self, reader: R) -> Self {
        self.reader = Some(Arc::new(reader));
        self
    }

    pub fn classifier<C: TextFieldClassifier + 'static>(mut self, classifier: C) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    pub fn factory<F: FieldFactory + 'static>(mut self, factory: F) -> Self {
        self.factory = Arc::new(factory);
        self
    }

    pub fn boosting<B: BoostingPolicy + 'static>(mut self, boosting: B) -> Self {
        self.boosting = Arc::new(boosting);
        self
    }

    /// Append a computed field definition. Declaration order is evaluation
    /// order in sequential mode.
    pub fn computed_field<C: ComputedField + 'static>(self, computed: C) -> Self {
        self.computed_field_arc(Arc::new(computed))
    }

    pub fn computed_field_arc(mut self, computed: Arc<dyn ComputedField>) -> Self {
        self.computed_fields.push(computed);
        self
    }

    pub fn settings(mut self, settings: IndexingSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the context, creating the worker pool when parallel computed
    /// fields are enabled.
    pub fn build(self) -> Result<IndexContext> {
        let reader: Arc<dyn FieldReader> = match self.reader {
            Some(reader) => reader,
            None => Arc::new(DefaultFieldReader::new()?),
        };

        let pool = if self.settings.parallel_computed_fields {
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.settings.degree_of_parallelism())
                .thread_name(|i| format!("computed-field-{i}"))
                .build()
                .map_err(|e| {
                    DocweaveError::thread_pool(format!("Failed to create thread pool: {e}"))
                })?;
            Some(Arc::new(pool))
        } else {
            None
        };

        Ok(IndexContext {
            field_map: self.field_map,
            translator: self.translator,
            formatter: self.formatter,
            reader,
            classifier: self.classifier,
            factory: self.factory,
            boosting: self.boosting,
            computed_fields: self.computed_fields,
            settings: self.settings,
            pool,
        })
    }
}

impl Default for IndexContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_context_has_no_pool() {
        let context = IndexContext::builder().build().unwrap();
        assert!(context.pool().is_none());
        assert!(context.computed_fields().is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = IndexConfig::from_json_str(
            r#"{
                "settings": {"parallel_computed_fields": true, "max_degree_of_parallelism": 3},
                "computed_fields": [{"type": "field_names", "field_name": "_fields"}]
            }"#,
        )
        .unwrap();

        let context = IndexContext::from_config(&config).unwrap();
        assert_eq!(context.pool().map(|p| p.current_num_threads()), Some(3));
        assert_eq!(context.computed_fields()[0].field_name(), "_fields");
        assert_eq!(context.translator().index_field_name("A B"), "a_b");
    }
}
