//! Boosting policies for items and fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::document::indexable::{DataField, Indexable};

/// Resolves relevance boosts.
///
/// A returned boost of `0.0` means "no boost"; it is added to a field's
/// configured boost and ignored at item level.
pub trait BoostingPolicy: Send + Sync {
    fn resolve_item_boost(&self, item: &dyn Indexable) -> f32;

    fn resolve_field_boost(&self, field: &DataField) -> f32;
}

/// Never boosts anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBoosting;

impl BoostingPolicy for NoBoosting {
    fn resolve_item_boost(&self, _item: &dyn Indexable) -> f32 {
        0.0
    }

    fn resolve_field_boost(&self, _field: &DataField) -> f32 {
        0.0
    }
}

/// Static boost tables keyed by item id and by field name.
///
/// ```
/// use docweave::document::indexable::{ContentItem, DataField};
/// use docweave::indexing::boost::{BoostingPolicy, RuleBoostingPolicy};
///
/// let policy = RuleBoostingPolicy::new()
///     .with_item_boost("home", 3.0)
///     .with_field_boost("Title", 1.5);
///
/// assert_eq!(policy.resolve_item_boost(&ContentItem::new("home")), 3.0);
/// assert_eq!(policy.resolve_item_boost(&ContentItem::new("other")), 0.0);
/// assert_eq!(policy.resolve_field_boost(&DataField::new("title", "text", "x")), 1.5);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleBoostingPolicy {
    /// Boost applied to items without an explicit entry.
    pub default_item_boost: f32,

    /// Item id to boost.
    pub items: HashMap<String, f32>,

    /// Field name to boost, matched case-insensitively.
    pub fields: HashMap<String, f32>,
}

impl RuleBoostingPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item_boost<S: Into<String>>(mut self, item_id: S, boost: f32) -> Self {
        self.items.insert(item_id.into(), boost);
        self
    }

    pub fn with_field_boost<S: AsRef<str>>(mut self, field_name: S, boost: f32) -> Self {
        self.fields.insert(field_name.as_ref().to_lowercase(), boost);
        self
    }

    pub fn with_default_item_boost(mut self, boost: f32) -> Self {
        self.default_item_boost = boost;
        self
    }
}

impl BoostingPolicy for RuleBoostingPolicy {
    fn resolve_item_boost(&self, item: &dyn Indexable) -> f32 {
        self.items
            .get(item.unique_id())
            .copied()
            .unwrap_or(self.default_item_boost)
    }

    fn resolve_field_boost(&self, field: &DataField) -> f32 {
        self.fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&field.name))
            .map_or(0.0, |(_, boost)| *boost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::indexable::ContentItem;

    #[test]
    fn test_no_boosting() {
        assert_eq!(NoBoosting.resolve_item_boost(&ContentItem::new("x")), 0.0);
        assert_eq!(NoBoosting.resolve_field_boost(&DataField::new("a", "b", "c")), 0.0);
    }

    #[test]
    fn test_rule_policy_from_json() {
        let policy: RuleBoostingPolicy = serde_json::from_str(
            r#"{"default_item_boost": 1.2, "items": {"news": 4.0}, "fields": {"Summary": 0.5}}"#,
        )
        .unwrap();

        assert_eq!(policy.resolve_item_boost(&ContentItem::new("news")), 4.0);
        assert_eq!(policy.resolve_item_boost(&ContentItem::new("misc")), 1.2);
        assert_eq!(
            policy.resolve_field_boost(&DataField::new("summary", "memo", "x")),
            0.5
        );
        assert_eq!(policy.resolve_field_boost(&DataField::new("body", "memo", "x")), 0.0);
    }
}
