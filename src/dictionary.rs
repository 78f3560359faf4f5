//! Nested translation dictionary.
//!
//! A [`TranslationTree`] is built once per load from parsed JSON and never
//! mutated afterwards; a reload builds a new tree and swaps it in whole
//! (see [`crate::store`]).

use std::collections::HashMap;

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

/// Separator between key path segments.
pub const KEY_SEPARATOR: char = '.';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("Translation resource root must be a JSON object, found {found}")]
    RootNotObject { found: &'static str },
}

/// A node of the translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    Leaf(String),
    Tree(TranslationTree),
}

/// Nested mapping of translation keys to leaf strings or sub-trees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTree {
    entries: HashMap<String, TranslationNode>,
}

impl TranslationTree {
    /// Builds a tree from a parsed translation resource.
    ///
    /// - objects become sub-trees
    /// - arrays become sub-trees keyed by element index (`items.0`)
    /// - strings become leaves; numbers and booleans become leaves holding
    ///   their JSON text
    /// - `null` values are dropped
    /// - keys containing [`KEY_SEPARATOR`] are dropped, since no dotted path
    ///   can address them
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use i18n_inspect_language_server::dictionary::TranslationTree;
    ///
    /// let tree = TranslationTree::from_json(&json!({
    ///     "common": { "hello": "Hello" }
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(tree.lookup("common.hello"), Some("Hello"));
    /// assert_eq!(tree.lookup("common"), None);
    /// ```
    pub fn from_json(json: &Value) -> Result<Self, DictionaryError> {
        match json {
            Value::Object(map) => Ok(tree_from_object(map)),
            other => Err(DictionaryError::RootNotObject { found: json_kind(other) }),
        }
    }

    /// Builds a tree directly from its top-level entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, TranslationNode)>) -> Self {
        Self { entries: entries.into_iter().collect() }
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a dotted key path to its leaf string.
    ///
    /// Returns `None` when a segment is missing, when the path runs through a
    /// leaf, or when it stops on a sub-tree. `""` splits into one empty
    /// segment and therefore never matches a normal key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut segments = key.split(KEY_SEPARATOR);
        let first = segments.next()?;
        let mut node = self.entries.get(first)?;

        for segment in segments {
            let TranslationNode::Tree(tree) = node else {
                return None;
            };
            node = tree.entries.get(segment)?;
        }

        match node {
            TranslationNode::Leaf(value) => Some(value),
            TranslationNode::Tree(_) => None,
        }
    }

    /// Lists the full dotted path of every leaf, depth first, unsorted.
    #[must_use]
    pub fn flatten(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.collect_keys(None, &mut keys);
        keys
    }

    /// Leaf paths starting with `prefix`.
    #[must_use]
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys = self.flatten();
        keys.retain(|key| key.starts_with(prefix));
        keys
    }

    fn collect_keys(&self, prefix: Option<&str>, keys: &mut Vec<String>) {
        for (key, node) in &self.entries {
            let full_key =
                prefix.map_or_else(|| key.clone(), |p| format!("{p}{KEY_SEPARATOR}{key}"));
            match node {
                TranslationNode::Leaf(_) => keys.push(full_key),
                TranslationNode::Tree(tree) => tree.collect_keys(Some(&full_key), keys),
            }
        }
    }
}

fn tree_from_object(map: &Map<String, Value>) -> TranslationTree {
    TranslationTree::from_entries(map.iter().filter_map(|(key, value)| {
        if key.contains(KEY_SEPARATOR) {
            tracing::debug!(key = %key, "Skipping translation key containing the separator");
            return None;
        }
        Some((key.clone(), node_from_json(value)?))
    }))
}

/// Converts a non-root JSON value; `None` drops the entry.
fn node_from_json(value: &Value) -> Option<TranslationNode> {
    match value {
        Value::String(s) => Some(TranslationNode::Leaf(s.clone())),
        Value::Object(map) => Some(TranslationNode::Tree(tree_from_object(map))),
        Value::Array(items) => Some(TranslationNode::Tree(TranslationTree::from_entries(
            items
                .iter()
                .enumerate()
                .filter_map(|(index, value)| Some((index.to_string(), node_from_json(value)?))),
        ))),
        Value::Number(_) | Value::Bool(_) => Some(TranslationNode::Leaf(value.to_string())),
        Value::Null => None,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
