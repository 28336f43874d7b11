//! Error types for the host.

use thiserror::Error;

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("resource type already registered: {0}")]
    DuplicateType(String),

    #[error("relationship '{relationship}' on '{type_name}' targets unregistered type '{target}'")]
    UnresolvedRelationship {
        type_name: String,
        relationship: String,
        target: String,
    },

    #[error("processor already registered for resource type: {0}")]
    DuplicateProcessor(String),

    #[error("processor bound to unregistered resource type: {0}")]
    ProcessorForUnknownType(String),

    #[error("service not found: {0}")]
    ServiceNotFound(String),

    /// A processor was asked to run an operation its policy does not provide.
    #[error("processor for '{resource_type}' does not implement '{operation}'")]
    Invocation {
        resource_type: String,
        operation: &'static str,
    },

    /// Failure raised by deployer-supplied code, passed through as-is.
    #[error(transparent)]
    Callback(#[from] anyhow::Error),
}
