//! Computed field definitions.
//!
//! A computed field derives its value by running logic against the whole
//! item instead of reading one declared field. Definitions are supplied by
//! users and may fail for data-dependent reasons; the evaluator decides what
//! a failure means for the item.
//!
//! # Example
//!
//! ```
//! use docweave::document::indexable::{ContentItem, Indexable};
//! use docweave::document::value::FieldInput;
//! use docweave::indexing::computed::{ComputedField, FnComputedField};
//!
//! let id_length = FnComputedField::new("id_length", |item: &dyn Indexable| {
//!     Ok(FieldInput::from(item.unique_id().len() as i64))
//! });
//!
//! let value = id_length.compute(&ContentItem::new("home")).unwrap();
//! assert_eq!(value, FieldInput::from(4i64));
//! ```

use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::document::indexable::Indexable;
use crate::document::value::{FieldInput, IndexValue};

/// A field whose value is computed from the item.
pub trait ComputedField: Send + Sync {
    /// Name the computed value is indexed under.
    fn field_name(&self) -> &str;

    /// Compute the value for an item.
    fn compute(&self, item: &dyn Indexable) -> anyhow::Result<FieldInput>;
}

/// Adapter turning a closure into a computed field.
pub struct FnComputedField<F> {
    field_name: String,
    compute: F,
}

impl<F> FnComputedField<F>
where
    F: Fn(&dyn Indexable) -> anyhow::Result<FieldInput> + Send + Sync,
{
    pub fn new<S: Into<String>>(field_name: S, compute: F) -> Self {
        Self {
            field_name: field_name.into(),
            compute,
        }
    }
}

impl<F> fmt::Debug for FnComputedField<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComputedField")
            .field("field_name", &self.field_name)
            .finish()
    }
}

impl<F> ComputedField for FnComputedField<F>
where
    F: Fn(&dyn Indexable) -> anyhow::Result<FieldInput> + Send + Sync,
{
    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn compute(&self, item: &dyn Indexable) -> anyhow::Result<FieldInput> {
        (self.compute)(item)
    }
}

/// Names of all declared fields of the item.
#[derive(Debug, Clone)]
pub struct FieldNamesField {
    field_name: String,
}

impl FieldNamesField {
    pub fn new<S: Into<String>>(field_name: S) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }
}

impl ComputedField for FieldNamesField {
    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn compute(&self, item: &dyn Indexable) -> anyhow::Result<FieldInput> {
        Ok(FieldInput::Multi(
            item.data_fields()
                .iter()
                .map(|f| IndexValue::Text(f.name.clone()))
                .collect(),
        ))
    }
}

/// Joins the values of several declared fields into one text value.
#[derive(Debug, Clone)]
pub struct ConcatenatedField {
    field_name: String,
    source_fields: Vec<String>,
    separator: String,
}

impl ConcatenatedField {
    pub fn new<S: Into<String>>(field_name: S, source_fields: Vec<String>) -> Self {
        Self {
            field_name: field_name.into(),
            source_fields,
            separator: " ".to_string(),
        }
    }

    pub fn with_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.separator = separator.into();
        self
    }
}

impl ComputedField for ConcatenatedField {
    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn compute(&self, item: &dyn Indexable) -> anyhow::Result<FieldInput> {
        let parts: Vec<String> = self
            .source_fields
            .iter()
            .filter_map(|name| item.data_field(name))
            .flat_map(|field| field.value.values().iter())
            .filter(|value| !value.is_null())
            .map(ToString::to_string)
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            Ok(FieldInput::null())
        } else {
            Ok(FieldInput::from(parts.join(&self.separator)))
        }
    }
}

/// Copies the raw value of another declared field.
///
/// When `required` is set, a missing source field is a failure.
#[derive(Debug, Clone)]
pub struct CopyField {
    field_name: String,
    source_field: String,
    required: bool,
}

impl CopyField {
    pub fn new<S: Into<String>, T: Into<String>>(field_name: S, source_field: T) -> Self {
        Self {
            field_name: field_name.into(),
            source_field: source_field.into(),
            required: false,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl ComputedField for CopyField {
    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn compute(&self, item: &dyn Indexable) -> anyhow::Result<FieldInput> {
        match item.data_field(&self.source_field) {
            Some(field) => Ok(field.value.clone()),
            None if self.required => Err(anyhow!(
                "source field '{}' is missing on item '{}'",
                self.source_field,
                item.unique_id()
            )),
            None => Ok(FieldInput::null()),
        }
    }
}

fn default_separator() -> String {
    " ".to_string()
}

/// Declarative form of the provided computed fields, as found in config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComputedFieldConfig {
    FieldNames {
        field_name: String,
    },
    Concatenated {
        field_name: String,
        source_fields: Vec<String>,
        #[serde(default = "default_separator")]
        separator: String,
    },
    Copy {
        field_name: String,
        source_field: String,
        #[serde(default)]
        required: bool,
    },
}

impl ComputedFieldConfig {
    pub fn field_name(&self) -> &str {
        match self {
            ComputedFieldConfig::FieldNames { field_name }
            | ComputedFieldConfig::Concatenated { field_name, .. }
            | ComputedFieldConfig::Copy { field_name, .. } => field_name,
        }
    }

    /// Instantiate the definition.
    pub fn build(&self) -> Arc<dyn ComputedField> {
        match self {
            ComputedFieldConfig::FieldNames { field_name } => {
                Arc::new(FieldNamesField::new(field_name.clone()))
            }
            ComputedFieldConfig::Concatenated {
                field_name,
                source_fields,
                separator,
            } => Arc::new(
                ConcatenatedField::new(field_name.clone(), source_fields.clone())
                    .with_separator(separator.clone()),
            ),
            ComputedFieldConfig::Copy {
                field_name,
                source_field,
                required,
            } => Arc::new(
                CopyField::new(field_name.clone(), source_field.clone()).required(*required),
            ),
        }
    }
}
