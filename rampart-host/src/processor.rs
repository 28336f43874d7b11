use crate::error::HostResult;
use async_trait::async_trait;
use rampart_model::{AttributeSet, Operation};

/// Request-handling component bound to a single resource type.
///
/// The host pipeline calls these hooks per request. Every hook has a
/// conservative default, so a processor only overrides what it needs:
/// - `generate_id` yields no id, leaving assignment to the store
/// - `encrypt_password` contributes no attributes
/// - `login` denies
#[async_trait]
pub trait Processor: Send + Sync {
    /// Name of the resource type this processor handles.
    fn resource_type(&self) -> &str;

    async fn generate_id(&self) -> HostResult<Option<String>> {
        Ok(None)
    }

    /// Returns the attributes to store in place of the plaintext password
    /// carried by `op`.
    async fn encrypt_password(&self, op: &Operation) -> HostResult<AttributeSet> {
        let _ = op;
        Ok(AttributeSet::new())
    }

    /// Decides whether a session may be created for the user whose stored
    /// attributes are `user`. `false` means authentication failed.
    async fn login(&self, op: &Operation, user: &AttributeSet) -> HostResult<bool> {
        let _ = (op, user);
        Ok(false)
    }
}
