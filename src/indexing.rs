//! The document-building pipeline.
//!
//! # Core Components
//!
//! - [`builder::IndexDocumentBuilder`] - Collects field records for one item
//! - [`evaluator`] - Runs computed fields sequentially or on a worker pool
//! - [`context::IndexContext`] - Collaborators and settings shared by a run
//! - [`crawler::DocumentCrawler`] - Builds documents for many items
//!
//! # Collaborators
//!
//! - [`translator::FieldNameTranslator`] - Canonical index field names
//! - [`formatter::ValueFormatter`] - Values to index-storage primitives
//! - [`reader::FieldReader`] / [`reader::TextFieldClassifier`] - Declared field access
//! - [`field_factory::FieldFactory`] - Configured values to field records
//! - [`boost::BoostingPolicy`] - Item and field boosts
//! - [`computed::ComputedField`] - User-supplied derived fields

pub mod boost;
pub mod builder;
pub mod computed;
pub mod context;
pub mod crawler;
mod evaluator;
pub mod field_factory;
pub mod formatter;
pub mod reader;
pub mod translator;

pub use builder::{DocumentBuilder, IndexDocumentBuilder};
pub use context::{IndexContext, IndexContextBuilder};
pub use crawler::{CrawlReport, DocumentCrawler};
