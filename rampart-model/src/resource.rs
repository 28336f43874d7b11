use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute values of a resource, keyed by attribute name.
pub type AttributeSet = serde_json::Map<String, serde_json::Value>;

/// A record of some registered resource type.
///
/// `id` is `None` until the store (or an identity policy) assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub attributes: AttributeSet,
    /// Related resource ids keyed by relationship name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Vec<String>>,
}

impl Resource {
    /// Creates an empty resource of the given type.
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            id: None,
            resource_type: resource_type.into(),
            attributes: AttributeSet::new(),
            relationships: BTreeMap::new(),
        }
    }

    /// Builder-style setter for the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder-style setter for a single attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Returns the raw attribute value, if present.
    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    /// Extract a string attribute.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(|v| v.as_str())
    }

    /// Extract a boolean attribute.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.attributes.get(name).and_then(|v| v.as_bool())
    }

    /// Extract a numeric attribute.
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).and_then(|v| v.as_f64())
    }
}
