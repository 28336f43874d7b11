use crate::resource::Resource;
use serde::{Deserialize, Serialize};

/// The kind of a request operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Add,
    Get,
    Update,
    Remove,
}

/// Identifies the resource (or collection) an operation targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A single operation handed to a processor by the host pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub op: OpKind,
    #[serde(rename = "ref")]
    pub target: ResourceRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Resource>,
}

impl Operation {
    /// An `add` operation carrying `data` for its resource type.
    pub fn add(data: Resource) -> Self {
        Self {
            op: OpKind::Add,
            target: ResourceRef {
                resource_type: data.resource_type.clone(),
                id: None,
            },
            data: Some(data),
        }
    }

    /// A `get` operation for a whole collection.
    pub fn get(resource_type: impl Into<String>) -> Self {
        Self {
            op: OpKind::Get,
            target: ResourceRef {
                resource_type: resource_type.into(),
                id: None,
            },
            data: None,
        }
    }

    /// Looks up an attribute on the operation payload.
    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.data.as_ref().and_then(|d| d.attribute(name))
    }

    /// Looks up a string attribute on the operation payload.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.get_str(name))
    }
}
