//! The configuration file for an indexing run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::field_map::FieldMapConfig;
use crate::config::settings::IndexingSettings;
use crate::error::{DocweaveError, Result};
use crate::indexing::boost::RuleBoostingPolicy;
use crate::indexing::computed::ComputedFieldConfig;
use crate::indexing::formatter::check_date_format;

fn default_true() -> bool {
    true
}

/// Everything needed to build an [`IndexContext`](crate::indexing::context::IndexContext)
/// from a JSON file.
///
/// # Example
///
/// ```
/// use docweave::config::index_config::IndexConfig;
///
/// let config = IndexConfig::from_json_str(r#"{
///     "settings": {"stop_on_crawl_field_error": true},
///     "field_map": {"fields": {"title": {"store": "YES", "boost": 2.0}}},
///     "computed_fields": [{"type": "field_names", "field_name": "_fields"}]
/// }"#).unwrap();
///
/// assert!(config.settings.stop_on_crawl_field_error);
/// assert_eq!(config.computed_fields.len(), 1);
/// assert!(config.lowercase_field_names);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default)]
    pub settings: IndexingSettings,

    #[serde(default)]
    pub field_map: FieldMapConfig,

    #[serde(default)]
    pub boosting: RuleBoostingPolicy,

    /// Type keys classified as text. Built-in list when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_field_types: Option<Vec<String>>,

    /// Type keys whose markup is stripped on read. Built-in list when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_field_types: Option<Vec<String>>,

    /// Chrono pattern for dates in index storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,

    #[serde(default = "default_true")]
    pub lowercase_field_names: bool,

    #[serde(default)]
    pub computed_fields: Vec<ComputedFieldConfig>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            settings: IndexingSettings::default(),
            field_map: FieldMapConfig::default(),
            boosting: RuleBoostingPolicy::default(),
            text_field_types: None,
            html_field_types: None,
            date_format: None,
            lowercase_field_names: true,
            computed_fields: Vec::new(),
        }
    }
}

impl IndexConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Check the configuration for consistency.
    pub fn validate(&self) -> Result<()> {
        if self.settings.max_degree_of_parallelism == Some(0) {
            return Err(DocweaveError::config(
                "max_degree_of_parallelism must be at least 1",
            ));
        }

        if let Some(format) = &self.date_format {
            check_date_format(format)?;
        }

        for (key, config) in self.field_map.configurations() {
            if let Some(rule) = &config.format {
                rule.validate().map_err(|e| match e {
                    DocweaveError::Config(msg) => {
                        DocweaveError::config(format!("field map entry {key:?}: {msg}"))
                    }
                    other => other,
                })?;
            }
        }

        for computed in &self.computed_fields {
            if computed.field_name().trim().is_empty() {
                return Err(DocweaveError::config(
                    "computed field declared without a field name",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::config::field_map::FieldMap;

    #[test]
    fn test_empty_config() {
        let config = IndexConfig::from_json_str("{}").unwrap();
        assert!(!config.settings.parallel_computed_fields);
        assert!(config.computed_fields.is_empty());
        assert!(config.lowercase_field_names);
    }

    #[test]
    fn test_validation() {
        let err = IndexConfig::from_json_str(
            r#"{"settings": {"max_degree_of_parallelism": 0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DocweaveError::Config(_)));

        let err = IndexConfig::from_json_str(
            r#"{"computed_fields": [{"type": "field_names", "field_name": " "}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DocweaveError::Config(_)));

        let err = IndexConfig::from_json_str(r#"{"date_format": "%Q"}"#).unwrap_err();
        assert!(matches!(err, DocweaveError::Config(_)));

        let err = IndexConfig::from_json_str(
            r#"{"field_map": {"types": {"datetime": {"format": {"rule": "date_format", "format": "%d %Q"}}}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DocweaveError::Config(_)));

        let err = IndexConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, DocweaveError::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"field_map": {{"fields": {{"Title": {{"boost": 2.5}}}}}}, "date_format": "%Y"}}"#
        )
        .unwrap();

        let config = IndexConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config.field_map.configuration_for_name("title").map(|c| c.boost),
            Some(2.5)
        );
        assert_eq!(config.date_format.as_deref(), Some("%Y"));
    }

    #[test]
    fn test_missing_file() {
        let err = IndexConfig::from_file("/nonexistent/docweave.json").unwrap_err();
        assert!(matches!(err, DocweaveError::Io(_)));
    }
}
