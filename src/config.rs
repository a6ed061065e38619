//! Configuration for document building.
//!
//! - [`field_config`] - Per-field storage, analysis and formatting rules
//! - [`field_map`] - Lookup of field configuration by name or data field
//! - [`settings`] - Behavioural switches (stop-on-error, parallelism, logging)
//! - [`index_config`] - The JSON configuration file tying everything together

pub mod field_config;
pub mod field_map;
pub mod index_config;
pub mod settings;

pub use field_config::{CONTENT_FIELD, FieldConfiguration, FormatRule};
pub use field_map::{FieldMap, FieldMapConfig};
pub use index_config::IndexConfig;
pub use settings::IndexingSettings;
