//! Registries populated at install time and read by the request pipeline.

use crate::error::{HostError, HostResult};
use crate::processor::Processor;
use futures::future::BoxFuture;
use rampart_model::{Relationship, Resource, ResourceSchema};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Async function resolving a list of names (roles, permissions, ...) for a user.
pub type ListResolver =
    Arc<dyn Fn(Resource) -> BoxFuture<'static, anyhow::Result<Vec<String>>> + Send + Sync>;

// ================================================================
// Types
// ================================================================

/// Ordered collection of registered resource schemas.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    schemas: Vec<ResourceSchema>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema.
    ///
    /// Relationship targets are not looked up here, so types may refer to
    /// each other in any registration order. [`TypeRegistry::check_resolved`]
    /// verifies them once registration is complete.
    pub fn register(&mut self, schema: ResourceSchema) -> HostResult<()> {
        if self.contains(&schema.type_name) {
            return Err(HostError::DuplicateType(schema.type_name));
        }

        debug!(resource_type = %schema.type_name, "Resource type registered");
        self.schemas.push(schema);
        Ok(())
    }

    /// Relationships whose target type is not registered, as
    /// `(type name, relationship name, target name)`.
    pub fn unresolved(&self) -> Vec<(&str, &str, &str)> {
        self.schemas
            .iter()
            .flat_map(|schema| {
                let type_name = schema.type_name.as_str();
                schema
                    .relationships
                    .iter()
                    .map(move |(name, rel)| (type_name, name.as_str(), rel.target.name()))
            })
            .filter(|(_, _, target)| !self.contains(target))
            .collect()
    }

    /// Fails on the first relationship whose target type is not registered.
    pub fn check_resolved(&self) -> HostResult<()> {
        match self.unresolved().first() {
            Some((type_name, relationship, target)) => Err(HostError::UnresolvedRelationship {
                type_name: type_name.to_string(),
                relationship: relationship.to_string(),
                target: target.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.schemas.iter().any(|s| s.type_name == type_name)
    }

    pub fn get(&self, type_name: &str) -> Option<&ResourceSchema> {
        self.schemas.iter().find(|s| s.type_name == type_name)
    }

    /// Follows a relationship of `type_name` to the schema it targets.
    pub fn resolve_relationship(
        &self,
        type_name: &str,
        relationship: &str,
    ) -> Option<(&Relationship, &ResourceSchema)> {
        let rel = self.get(type_name)?.relationships.get(relationship)?;
        let target = self.get(rel.target.name())?;
        Some((rel, target))
    }

    /// Type names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.iter().map(|s| s.type_name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

// ================================================================
// Processors
// ================================================================

/// Ordered collection of processors, at most one per resource type.
#[derive(Default)]
pub struct ProcessorRegistry {
    processors: Vec<Arc<dyn Processor>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a processor. `types` must already know its resource type.
    pub fn register(
        &mut self,
        types: &TypeRegistry,
        processor: Arc<dyn Processor>,
    ) -> HostResult<()> {
        let resource_type = processor.resource_type().to_string();
        if !types.contains(&resource_type) {
            return Err(HostError::ProcessorForUnknownType(resource_type));
        }
        if self.for_type(&resource_type).is_some() {
            return Err(HostError::DuplicateProcessor(resource_type));
        }

        debug!(resource_type = %resource_type, "Processor registered");
        self.processors.push(processor);
        Ok(())
    }

    pub fn for_type(&self, resource_type: &str) -> Option<Arc<dyn Processor>> {
        self.processors
            .iter()
            .find(|p| p.resource_type() == resource_type)
            .cloned()
    }

    /// Resource types with a processor, in registration order.
    pub fn resource_types(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.resource_type()).collect()
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

// ================================================================
// Services
// ================================================================

/// Named services, stored type-erased and recovered by type on lookup.
#[derive(Default)]
pub struct ServiceRegistry {
    services: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `service` under `name`, replacing any previous entry.
    pub fn insert<T: Any + Send + Sync>(&mut self, name: impl Into<String>, service: T) {
        let name = name.into();
        if self.services.insert(name.clone(), Arc::new(service)).is_some() {
            warn!(service = %name, "Service replaced");
        } else {
            debug!(service = %name, "Service registered");
        }
    }

    /// Returns the service under `name` if it exists and has type `T`.
    pub fn get<T: Any + Send + Sync + Clone>(&self, name: &str) -> Option<T> {
        self.services
            .get(name)
            .and_then(|s| s.downcast_ref::<T>())
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Runs the [`ListResolver`] registered under `name` for `user`.
    pub async fn resolve_list(&self, name: &str, user: Resource) -> HostResult<Vec<String>> {
        let resolver = self
            .get::<ListResolver>(name)
            .ok_or_else(|| HostError::ServiceNotFound(name.to_string()))?;
        Ok(resolver(user).await?)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
