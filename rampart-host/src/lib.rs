//! Minimal resource API host for Rampart.
//!
//! Owns the registries an addon installs into:
//! - [`TypeRegistry`]: resource schemas, with relationship targets resolved
//!   by name at registration time
//! - [`ProcessorRegistry`]: one [`Processor`] per resource type
//! - [`ServiceRegistry`]: named, type-erased services shared between components
//! - [`Diagnostics`]: structured warnings raised during setup
//!
//! Request dispatch, persistence and serialization are not part of this crate;
//! the pipeline that drives processors lives elsewhere.

mod application;
mod diagnostics;
mod error;
mod processor;
mod registry;

pub use application::{Addon, Application};
pub use diagnostics::{Diagnostic, DiagnosticLevel, Diagnostics};
pub use error::{HostError, HostResult};
pub use processor::Processor;
pub use registry::{ListResolver, ProcessorRegistry, ServiceRegistry, TypeRegistry};
