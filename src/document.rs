//! Document data model.
//!
//! This module provides the types that flow through the document builder:
//!
//! - [`value::IndexValue`] / [`value::FieldInput`] - Raw values, classified once
//!   as single or multi-valued when they enter the pipeline
//! - [`indexable::DataField`] / [`indexable::Indexable`] - Declared attributes of
//!   a source item and the item capability itself
//! - [`field::FieldRecord`] - One named, typed, boosted field of the output
//! - [`document::IndexDocument`] - The finished flat document
//!
//! # Examples
//!
//! ```
//! use docweave::document::indexable::{ContentItem, DataField};
//! use docweave::document::indexable::Indexable;
//!
//! let item = ContentItem::new("home")
//!     .with_field(DataField::new("Title", "single-line text", "Hello"))
//!     .with_field(DataField::new("Tags", "multilist", vec!["red", "blue"]));
//!
//! assert_eq!(item.data_fields().len(), 2);
//! ```

#[allow(clippy::module_inception)]
pub mod document;
pub mod field;
pub mod indexable;
pub mod value;

pub use document::IndexDocument;
pub use field::{FieldRecord, IndexMode, Store, TermVector};
pub use indexable::{ContentItem, DataField, Indexable};
pub use value::{FieldInput, IndexValue};
