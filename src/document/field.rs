//! Field records and their storage/analysis policies.
//!
//! This module defines:
//! - [`FieldRecord`] - One named, typed, boosted unit of indexable data
//! - [`Store`], [`IndexMode`], [`TermVector`] - How the search engine keeps,
//!   analyzes and vectorizes the value
//!
//! The policy enums accept the classic upper-case configuration spellings
//! (`"YES"`, `"TOKENIZED"`, `"WITH_POSITIONS_OFFSETS"`, ...) when parsed from
//! strings or deserialized, so existing field maps can be reused verbatim.
//!
//! ```
//! use docweave::document::field::{IndexMode, Store, TermVector};
//!
//! assert_eq!("YES".parse::<Store>().unwrap(), Store::Yes);
//! assert_eq!("tokenized".parse::<IndexMode>().unwrap(), IndexMode::Tokenized);
//! assert_eq!(
//!     "WITH_POSITIONS_OFFSETS".parse::<TermVector>().unwrap(),
//!     TermVector::WithPositionsOffsets
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DocweaveError, Result};

/// Whether the original value is kept in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Store {
    #[default]
    No,
    Yes,
}

/// How the value is analyzed for search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexMode {
    /// Not searchable.
    No,
    /// Run through the analyzer.
    #[default]
    Tokenized,
    /// Indexed as one verbatim term.
    Untokenized,
    /// Analyzed, without length norms.
    TokenizedNoNorms,
    /// Verbatim term, without length norms.
    UntokenizedNoNorms,
}

impl IndexMode {
    pub fn is_indexed(self) -> bool {
        self != IndexMode::No
    }
}

/// Term vector retention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TermVector {
    #[default]
    No,
    Yes,
    WithPositions,
    WithOffsets,
    WithPositionsOffsets,
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace([' ', '-'], "_")
}

impl FromStr for Store {
    type Err = DocweaveError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "YES" | "TRUE" | "COMPRESS" => Ok(Store::Yes),
            "NO" | "FALSE" => Ok(Store::No),
            other => Err(DocweaveError::config(format!("unknown store policy: {other}"))),
        }
    }
}

impl FromStr for IndexMode {
    type Err = DocweaveError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "NO" => Ok(IndexMode::No),
            "TOKENIZED" | "ANALYZED" => Ok(IndexMode::Tokenized),
            "UNTOKENIZED" | "NOT_ANALYZED" => Ok(IndexMode::Untokenized),
            "NO_NORMS" | "ANALYZED_NO_NORMS" | "TOKENIZED_NO_NORMS" => {
                Ok(IndexMode::TokenizedNoNorms)
            }
            "NOT_ANALYZED_NO_NORMS" | "UNTOKENIZED_NO_NORMS" => Ok(IndexMode::UntokenizedNoNorms),
            other => Err(DocweaveError::config(format!("unknown index policy: {other}"))),
        }
    }
}

impl FromStr for TermVector {
    type Err = DocweaveError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "NO" => Ok(TermVector::No),
            "YES" => Ok(TermVector::Yes),
            "WITH_POSITIONS" => Ok(TermVector::WithPositions),
            "WITH_OFFSETS" => Ok(TermVector::WithOffsets),
            "WITH_POSITIONS_OFFSETS" => Ok(TermVector::WithPositionsOffsets),
            other => Err(DocweaveError::config(format!(
                "unknown term vector policy: {other}"
            ))),
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Store::No => "NO",
            Store::Yes => "YES",
        })
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexMode::No => "NO",
            IndexMode::Tokenized => "TOKENIZED",
            IndexMode::Untokenized => "UNTOKENIZED",
            IndexMode::TokenizedNoNorms => "TOKENIZED_NO_NORMS",
            IndexMode::UntokenizedNoNorms => "UNTOKENIZED_NO_NORMS",
        })
    }
}

impl fmt::Display for TermVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TermVector::No => "NO",
            TermVector::Yes => "YES",
            TermVector::WithPositions => "WITH_POSITIONS",
            TermVector::WithOffsets => "WITH_OFFSETS",
            TermVector::WithPositionsOffsets => "WITH_POSITIONS_OFFSETS",
        })
    }
}

// Policies travel through config files as their textual form.
macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_serde!(Store);
string_serde!(IndexMode);
string_serde!(TermVector);

/// A single indexable field of a document.
///
/// Created by a field factory (or by the builder's unconfigured-field
/// fallback) and never modified after it joins the builder's collection,
/// apart from the boost stamped on it at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Canonical index field name.
    pub name: String,

    /// Storage form of the value.
    pub value: String,

    pub store: Store,

    pub index: IndexMode,

    pub term_vector: TermVector,

    /// Field-level relevance multiplier.
    pub boost: f32,
}

impl FieldRecord {
    /// Create a new record with a neutral boost of `1.0`.
    pub fn new<S: Into<String>, V: Into<String>>(
        name: S,
        value: V,
        store: Store,
        index: IndexMode,
        term_vector: TermVector,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            store,
            index,
            term_vector,
            boost: 1.0,
        }
    }

    /// Record used for fields that have no configuration at all:
    /// stored, analyzed, with positions and offsets.
    pub fn analyzed_default<S: Into<String>, V: Into<String>>(name: S, value: V) -> Self {
        Self::new(
            name,
            value,
            Store::Yes,
            IndexMode::Tokenized,
            TermVector::WithPositionsOffsets,
        )
    }

    /// Set the boost.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}
