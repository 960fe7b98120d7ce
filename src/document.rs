//! Design export document model.

use serde::Serialize;
use serde_json::{Map, Value};

/// Top-level keys the compression stages know about.
pub mod keys {
    pub const ASSETS: &str = "assets";
    pub const DESIGN_TOKENS: &str = "designTokens";
    pub const TREE: &str = "tree";
    pub const SCREENSHOT: &str = "screenshot";
    pub const COMPONENTS: &str = "components";
    pub const DEFINITIONS: &str = "definitions";
    pub const CSS_VARIABLES: &str = "cssVariables";
    pub const VARIANTS: &str = "variants";
    pub const EXTRACTION_SUMMARY: &str = "extractionSummary";
}

/// A design export: one JSON object whose key order is preserved.
///
/// Every key is optional. Keys the compressor does not know about pass through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    pub root: Map<String, Value>,
}

impl Document {
    pub fn new(root: Map<String, Value>) -> Self {
        Self { root }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    /// Borrow a top-level value as an object, if it is one.
    pub fn object_mut(&mut self, key: &str) -> Option<&mut Map<String, Value>> {
        self.root.get_mut(key).and_then(Value::as_object_mut)
    }

    /// Remove a top-level key, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.root.shift_remove(key)
    }

    /// Empty `components.definitions`, keeping any sibling keys.
    ///
    /// Returns true if a non-empty `definitions` value was replaced.
    pub fn clear_component_definitions(&mut self) -> bool {
        let Some(definitions) = self
            .object_mut(keys::COMPONENTS)
            .and_then(|components| components.get_mut(keys::DEFINITIONS))
        else {
            return false;
        };
        if matches!(definitions, Value::Object(d) if d.is_empty()) {
            return false;
        }
        *definitions = Value::Object(Map::new());
        true
    }
}

impl From<Map<String, Value>> for Document {
    fn from(root: Map<String, Value>) -> Self {
        Self::new(root)
    }
}
