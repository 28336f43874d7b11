//! Error types for the user management addon.

use rampart_host::HostError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for identity and login policies.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Failure of a policy operation.
///
/// Processors translate these into host errors carrying their resource type.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The policy does not provide this operation.
    #[error("operation not implemented: {0}")]
    NotImplemented(&'static str),

    /// Failure raised by a deployer callback, passed through as-is.
    #[error(transparent)]
    Callback(#[from] anyhow::Error),
}

impl PolicyError {
    /// Converts into the host error reported by the processor for `resource_type`.
    pub(crate) fn into_host_error(self, resource_type: &str) -> HostError {
        match self {
            Self::NotImplemented(operation) => HostError::Invocation {
                resource_type: resource_type.to_string(),
                operation,
            },
            Self::Callback(e) => HostError::Callback(e),
        }
    }
}

/// Errors loading addon settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}
