//! The processor for the session resource.

use crate::options::ResolvedOptions;
use crate::policy::{CallbackLoginPolicy, LoginPolicy};
use async_trait::async_trait;
use rampart_host::{HostResult, Processor};
use rampart_model::{AttributeSet, Operation, ResourceSchema};
use std::sync::Arc;

pub struct SessionProcessor {
    resource_type: String,
    username_field: String,
    password_field: String,
    policy: Arc<dyn LoginPolicy>,
}

impl SessionProcessor {
    pub fn new(
        schema: &ResourceSchema,
        username_field: impl Into<String>,
        password_field: impl Into<String>,
        policy: Arc<dyn LoginPolicy>,
    ) -> Self {
        Self {
            resource_type: schema.type_name.clone(),
            username_field: username_field.into(),
            password_field: password_field.into(),
            policy,
        }
    }

    pub fn username_field(&self) -> &str {
        &self.username_field
    }

    pub fn password_field(&self) -> &str {
        &self.password_field
    }

    /// The (username, password) pair carried by a session request, if both
    /// are present as strings. The host uses the username to look the user up.
    pub fn credentials<'a>(&self, op: &'a Operation) -> Option<(&'a str, &'a str)> {
        let username = op.get_str(&self.username_field)?;
        let password = op.get_str(&self.password_field)?;
        Some((username, password))
    }
}

#[async_trait]
impl Processor for SessionProcessor {
    fn resource_type(&self) -> &str {
        &self.resource_type
    }

    async fn login(&self, op: &Operation, user: &AttributeSet) -> HostResult<bool> {
        self.policy
            .login(op, user)
            .await
            .map_err(|e| e.into_host_error(&self.resource_type))
    }
}

/// Builds the session processor around the configured login callback.
pub fn compose_session_processor(
    options: &ResolvedOptions,
    session: &ResourceSchema,
) -> SessionProcessor {
    SessionProcessor::new(
        session,
        options.username_request_parameter.as_str(),
        options.password_request_parameter.as_str(),
        Arc::new(CallbackLoginPolicy::new(Arc::clone(&options.login))),
    )
}
