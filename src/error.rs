//! Error types for the Docweave library.
//!
//! All fallible operations return [`DocweaveError`] through the crate-wide
//! [`Result`] alias. Data-dependent conditions such as unconfigured fields or
//! values that format to null are not errors; they are absorbed by the
//! document builder. What surfaces here are configuration problems and
//! computed-field failures that the stop-on-error policy escalates.
//!
//! # Examples
//!
//! ```
//! use docweave::error::{DocweaveError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(DocweaveError::config("missing field map"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Docweave operations.
#[derive(Error, Debug)]
pub enum DocweaveError {
    /// I/O errors (configuration and item files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A computed field could not produce a value for an item.
    #[error("Could not compute value for computed field '{field_name}' for item '{item_id}': {source}")]
    ComputedField {
        field_name: String,
        item_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// Several failures collected from independent parallel evaluations.
    #[error("{} computed field evaluation(s) failed", .0.len())]
    Aggregate(Vec<DocweaveError>),

    /// Worker pool construction errors
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with DocweaveError.
pub type Result<T> = std::result::Result<T, DocweaveError>;

impl DocweaveError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        DocweaveError::Config(msg.into())
    }

    /// Create a new computed field error.
    pub fn computed_field<S: Into<String>, T: Into<String>>(
        field_name: S,
        item_id: T,
        source: anyhow::Error,
    ) -> Self {
        DocweaveError::ComputedField {
            field_name: field_name.into(),
            item_id: item_id.into(),
            source,
        }
    }

    /// Create a new thread pool error.
    pub fn thread_pool<S: Into<String>>(msg: S) -> Self {
        DocweaveError::ThreadPool(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        DocweaveError::Other(msg.into())
    }

    /// Errors wrapped by this one. Empty unless this is an aggregate.
    pub fn inner_errors(&self) -> &[DocweaveError] {
        match self {
            DocweaveError::Aggregate(errors) => errors,
            _ => &[],
        }
    }

    /// Name of the computed field that failed, if this is a computed field error.
    pub fn computed_field_name(&self) -> Option<&str> {
        match self {
            DocweaveError::ComputedField { field_name, .. } => Some(field_name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = DocweaveError::config("bad policy");
        assert_eq!(error.to_string(), "Configuration error: bad policy");

        let error = DocweaveError::thread_pool("no threads");
        assert_eq!(error.to_string(), "Thread pool error: no threads");
    }

    #[test]
    fn test_computed_field_error() {
        let error = DocweaveError::computed_field("rank", "item-1", anyhow::anyhow!("boom"));
        assert_eq!(error.computed_field_name(), Some("rank"));
        assert_eq!(
            error.to_string(),
            "Could not compute value for computed field 'rank' for item 'item-1': boom"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_aggregate_error() {
        let error = DocweaveError::Aggregate(vec![
            DocweaveError::computed_field("a", "item", anyhow::anyhow!("x")),
            DocweaveError::computed_field("b", "item", anyhow::anyhow!("y")),
        ]);
        assert_eq!(error.inner_errors().len(), 2);
        assert_eq!(error.to_string(), "2 computed field evaluation(s) failed");
        assert!(DocweaveError::other("x").inner_errors().is_empty());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = DocweaveError::from(io_error);

        match error {
            DocweaveError::Io(_) => {} // Expected
            _ => panic!("Expected IO error"),
        }
    }
}
