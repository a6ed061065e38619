//! Translation of declared field names into canonical index field names.

/// Maps a declared field name to the name used in the index.
///
/// Translation must be idempotent: translating an already-translated name
/// returns it unchanged.
pub trait FieldNameTranslator: Send + Sync {
    fn index_field_name(&self, name: &str) -> String;
}

/// Trims the name, replaces spaces with underscores and, unless disabled,
/// lowercases it.
///
/// ```
/// use docweave::indexing::translator::{DefaultFieldNameTranslator, FieldNameTranslator};
///
/// let translator = DefaultFieldNameTranslator::new();
/// assert_eq!(translator.index_field_name(" Page Title "), "page_title");
///
/// let translator = DefaultFieldNameTranslator::new().lowercase(false);
/// assert_eq!(translator.index_field_name("Page Title"), "Page_Title");
/// ```
#[derive(Debug, Clone)]
pub struct DefaultFieldNameTranslator {
    lowercase: bool,
}

impl DefaultFieldNameTranslator {
    pub fn new() -> Self {
        Self { lowercase: true }
    }

    /// Enable or disable lowercasing.
    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }
}

impl Default for DefaultFieldNameTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldNameTranslator for DefaultFieldNameTranslator {
    fn index_field_name(&self, name: &str) -> String {
        let name = name.trim().replace(' ', "_");
        if self.lowercase {
            name.to_lowercase()
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_is_idempotent() {
        let translator = DefaultFieldNameTranslator::new();
        let once = translator.index_field_name("Display Name");
        assert_eq!(once, "display_name");
        assert_eq!(translator.index_field_name(&once), once);
    }
}
