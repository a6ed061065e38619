//! Indexing settings that steer the document builder.

use serde::{Deserialize, Serialize};

/// Behavioural switches for document building.
///
/// ```
/// use docweave::config::settings::IndexingSettings;
///
/// let settings: IndexingSettings =
///     serde_json::from_str(r#"{"parallel_computed_fields": true, "max_degree_of_parallelism": 2}"#)
///         .unwrap();
/// assert!(settings.parallel_computed_fields);
/// assert!(!settings.stop_on_crawl_field_error);
/// assert_eq!(settings.degree_of_parallelism(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingSettings {
    /// Escalate computed-field failures instead of skipping the field.
    pub stop_on_crawl_field_error: bool,

    /// Evaluate computed fields on a worker pool.
    pub parallel_computed_fields: bool,

    /// Worker count for parallel computed fields. Defaults to the CPU count.
    pub max_degree_of_parallelism: Option<usize>,

    /// Log the type and value of every field that falls back to defaults.
    pub verbose_logging: bool,
}

impl IndexingSettings {
    /// Effective worker count, never less than one.
    pub fn degree_of_parallelism(&self) -> usize {
        self.max_degree_of_parallelism
            .unwrap_or_else(num_cpus::get)
            .max(1)
    }
}
