use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declares a resource type: its name, attributes and relationships.
///
/// Attribute and relationship maps are ordered so that two schemas built
/// from the same inputs compare and serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSchema {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeType>,
    #[serde(default)]
    pub relationships: BTreeMap<String, Relationship>,
}

impl ResourceSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: BTreeMap::new(),
            relationships: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) an attribute declaration.
    pub fn attribute(mut self, name: impl Into<String>, attribute_type: AttributeType) -> Self {
        self.attributes.insert(name.into(), attribute_type);
        self
    }

    /// Adds (or replaces) a relationship declaration.
    pub fn relationship(mut self, name: impl Into<String>, relationship: Relationship) -> Self {
        self.relationships.insert(name.into(), relationship);
        self
    }

    pub fn attribute_type(&self, name: &str) -> Option<AttributeType> {
        self.attributes.get(name).copied()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Names of all attributes declared as [`AttributeType::Password`].
    pub fn password_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, t)| **t == AttributeType::Password)
            .map(|(name, _)| name.as_str())
    }
}

/// Primitive or specialized type of an attribute.
///
/// `Password` is a string the host must never render back to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Number,
    Boolean,
    Password,
    Json,
}

/// Reference to another resource type by its registered name.
///
/// Resolved by the host's type registry when the declaring schema is
/// registered, never when the schema is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn named(type_name: impl Into<String>) -> Self {
        Self(type_name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    One,
    Many,
}

/// A link from one resource type to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub target: TypeRef,
    pub cardinality: Cardinality,
    /// True when the declaring side holds the foreign key.
    #[serde(default)]
    pub belongs_to: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
}

impl Relationship {
    /// A to-one link whose foreign key lives on the declaring resource.
    pub fn belongs_to(target: impl Into<String>, foreign_key: impl Into<String>) -> Self {
        Self {
            target: TypeRef::named(target),
            cardinality: Cardinality::One,
            belongs_to: true,
            foreign_key: Some(foreign_key.into()),
        }
    }

    /// A to-many link owned by the other side.
    pub fn has_many(target: impl Into<String>) -> Self {
        Self {
            target: TypeRef::named(target),
            cardinality: Cardinality::Many,
            belongs_to: false,
            foreign_key: None,
        }
    }
}
