//! Resource model for Rampart.
//!
//! Defines the types shared between the host and its addons:
//! - [`Resource`]: a typed record (id, type, JSON attributes, relationships)
//! - [`ResourceSchema`]: declares a resource type's attributes and relationships
//! - [`Operation`]: a single request operation routed to a processor
//!
//! Nothing here knows about persistence or transport. The host registries
//! and processors consume these types; addons construct them.

mod operation;
mod resource;
mod schema;

pub use operation::{OpKind, Operation, ResourceRef};
pub use resource::{AttributeSet, Resource};
pub use schema::{AttributeType, Cardinality, Relationship, ResourceSchema, TypeRef};
