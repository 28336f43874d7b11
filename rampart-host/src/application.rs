//! The host application: registries plus the addon lifecycle.

use crate::diagnostics::Diagnostics;
use crate::error::HostResult;
use crate::processor::Processor;
use crate::registry::{ProcessorRegistry, ServiceRegistry, TypeRegistry};
use rampart_model::ResourceSchema;
use std::sync::Arc;
use tracing::{info, warn};

/// A unit of host configuration installed once at startup.
///
/// `install` consumes the addon, so an instance cannot be installed twice.
pub trait Addon {
    fn name(&self) -> &'static str;

    fn install(self, app: &mut Application) -> HostResult<()>;
}

#[derive(Default)]
pub struct Application {
    types: TypeRegistry,
    processors: ProcessorRegistry,
    services: ServiceRegistry,
    diagnostics: Diagnostics,
}

impl Application {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs an addon, then checks that every relationship target it
    /// left behind names a registered type. Registrations made before a
    /// failure are kept.
    pub fn use_addon<A: Addon>(&mut self, addon: A) -> HostResult<()> {
        let name = addon.name();
        info!(addon = name, "Installing addon");
        let result = addon
            .install(self)
            .and_then(|()| self.types.check_resolved());
        match result {
            Ok(()) => {
                info!(addon = name, "Addon installed");
                Ok(())
            }
            Err(e) => {
                warn!(addon = name, error = %e, "Addon installation failed");
                Err(e)
            }
        }
    }

    pub fn register_type(&mut self, schema: ResourceSchema) -> HostResult<()> {
        self.types.register(schema)
    }

    pub fn register_processor(&mut self, processor: Arc<dyn Processor>) -> HostResult<()> {
        self.processors.register(&self.types, processor)
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn processors(&self) -> &ProcessorRegistry {
        &self.processors
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut ServiceRegistry {
        &mut self.services
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}
