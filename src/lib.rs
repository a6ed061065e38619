//! # Docweave
//!
//! Builds flat, indexable documents for a full-text search engine out of
//! structured content items.
//!
//! ## Features
//!
//! - Per-field storage, analysis, term-vector and boost configuration
//! - Single and multi-valued fields through one tagged value model
//! - Safe defaults for fields that have no configuration
//! - Computed fields, evaluated in order or on a bounded worker pool, with an
//!   optional stop-on-error policy
//! - Item-level and field-level boosting

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod indexing;

pub mod prelude {
    pub use crate::config::{FieldConfiguration, FieldMap, FieldMapConfig, IndexConfig, IndexingSettings};
    pub use crate::document::{
        ContentItem, DataField, FieldInput, FieldRecord, IndexDocument, IndexMode, IndexValue,
        Indexable, Store, TermVector,
    };
    pub use crate::error::{DocweaveError, Result};
    pub use crate::indexing::{DocumentBuilder, DocumentCrawler, IndexContext, IndexDocumentBuilder};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
