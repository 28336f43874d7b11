//! The processor for the user resource.

use crate::options::{ResolvedOptions, UserProcessorKind};
use crate::policy::{CallbackIdentityPolicy, UserIdentityPolicy};
use async_trait::async_trait;
use rampart_host::{HostResult, Processor};
use rampart_model::{AttributeSet, Operation};
use std::sync::Arc;
use tracing::debug;

/// Processor for the user resource, delegating identity concerns to a policy.
pub struct UserProcessor {
    resource_type: String,
    policy: Arc<dyn UserIdentityPolicy>,
}

impl UserProcessor {
    pub fn new(resource_type: impl Into<String>, policy: Arc<dyn UserIdentityPolicy>) -> Self {
        Self {
            resource_type: resource_type.into(),
            policy,
        }
    }

    /// Applies id generation and password encryption to an incoming `add`.
    ///
    /// The generated id is set only when one is produced. Encrypted
    /// attributes overwrite the payload's attributes of the same name.
    pub async fn prepare_add(&self, mut op: Operation) -> HostResult<Operation> {
        let id = self.generate_id().await?;
        let encrypted = self.encrypt_password(&op).await?;

        if let Some(data) = op.data.as_mut() {
            if let Some(id) = id {
                data.id = Some(id);
            }
            data.attributes.extend(encrypted);
        }
        Ok(op)
    }
}

#[async_trait]
impl Processor for UserProcessor {
    fn resource_type(&self) -> &str {
        &self.resource_type
    }

    async fn generate_id(&self) -> HostResult<Option<String>> {
        self.policy
            .generate_id()
            .await
            .map_err(|e| e.into_host_error(&self.resource_type))
    }

    async fn encrypt_password(&self, op: &Operation) -> HostResult<AttributeSet> {
        self.policy
            .encrypt_password(op)
            .await
            .map_err(|e| e.into_host_error(&self.resource_type))
    }
}

/// Selects the identity policy for the user processor.
///
/// The built-in processor runs the configured callbacks. A custom processor
/// is used as-is and the callbacks are not consulted.
pub fn compose_user_processor(options: &ResolvedOptions) -> UserProcessor {
    let resource_type = options.user_resource.type_name.as_str();
    let policy: Arc<dyn UserIdentityPolicy> = match &options.user_processor {
        UserProcessorKind::BuiltIn => {
            debug!(resource_type, "Composing built-in user processor");
            Arc::new(CallbackIdentityPolicy::new(
                options.generate_id.clone(),
                Arc::clone(&options.encrypt_password),
            ))
        }
        UserProcessorKind::Custom(custom) => {
            debug!(resource_type, "Composing custom user processor");
            Arc::clone(custom)
        }
    };
    UserProcessor::new(resource_type, policy)
}
