//! Ordered, immutable mapping from field name to [`FieldRule`].

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use super::rules::FieldRule;
use crate::error::CoreError;

/// The fixed set of field rules for all model-input columns.
///
/// Iteration order is registration order, which is also the order in which
/// fields are checked. An empty registry disables validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleRegistry {
    rules: IndexMap<String, FieldRule>,
}

impl RuleRegistry {
    /// Registry with no rules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from `(field, rule)` pairs in check order.
    ///
    /// Fails if a field appears twice or a rule can never be satisfied.
    pub fn from_rules<K, I>(rules: I) -> Result<Self, CoreError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FieldRule)>,
    {
        let mut map = IndexMap::new();
        for (field, rule) in rules {
            let field = field.into();
            rule.check_definition(&field)?;
            if map.contains_key(&field) {
                return Err(CoreError::DuplicateField(field));
            }
            map.insert(field, rule);
        }
        Ok(Self { rules: map })
    }

    /// Parse a JSON object keyed by field name; key order is check order.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let rules: IndexMap<String, FieldRule> = serde_json::from_str(json)?;
        Self::from_rules(rules)
    }

    /// Read and parse a JSON rule file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// All rules in check order.
    pub fn get_rules(&self) -> &IndexMap<String, FieldRule> {
        &self.rules
    }

    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.rules.get(field)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }
}
