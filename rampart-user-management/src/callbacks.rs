//! Deployer callback types and the built-in defaults.
//!
//! Callbacks receive owned copies of request data so the futures they return
//! can outlive the call. None of them share mutable state.

use futures::future::{BoxFuture, FutureExt};
use rampart_host::ListResolver;
use rampart_model::{AttributeSet, Operation, Resource};
use std::future::Future;
use std::sync::Arc;
use tracing::trace;
use uuid::Uuid;

/// Produces an id for a new user. `None` leaves assignment to the store.
pub type GenerateIdFn =
    Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<Option<String>>> + Send + Sync>;

/// Maps an add/update operation to the attributes that replace its plaintext password.
pub type EncryptPasswordFn =
    Arc<dyn Fn(Operation) -> BoxFuture<'static, anyhow::Result<AttributeSet>> + Send + Sync>;

/// Decides whether a session may be created for a user's stored attributes.
pub type LoginFn = Arc<
    dyn Fn(Operation, AttributeSet) -> BoxFuture<'static, anyhow::Result<bool>> + Send + Sync,
>;

/// Attribute under which the default password callback reads and writes.
pub const PASSWORD_ATTRIBUTE: &str = "password";

pub fn generate_id_fn<F, Fut>(f: F) -> GenerateIdFn
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Option<String>>> + Send + 'static,
{
    Arc::new(move || f().boxed())
}

pub fn encrypt_password_fn<F, Fut>(f: F) -> EncryptPasswordFn
where
    F: Fn(Operation) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<AttributeSet>> + Send + 'static,
{
    Arc::new(move |op| f(op).boxed())
}

pub fn login_fn<F, Fut>(f: F) -> LoginFn
where
    F: Fn(Operation, AttributeSet) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
{
    Arc::new(move |op, user| f(op, user).boxed())
}

pub fn list_resolver_fn<F, Fut>(f: F) -> ListResolver
where
    F: Fn(Resource) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Vec<String>>> + Send + 'static,
{
    Arc::new(move |user| f(user).boxed())
}

/// Accepts every login. Never safe outside development.
pub fn permit_all_login() -> LoginFn {
    login_fn(|_op, _user| async {
        trace!("Default login callback permitted session");
        Ok(true)
    })
}

/// Hands the plaintext password back unchanged. Never safe outside development.
pub fn plaintext_password() -> EncryptPasswordFn {
    encrypt_password_fn(|op: Operation| async move {
        let mut attributes = AttributeSet::new();
        if let Some(password) = op.attribute(PASSWORD_ATTRIBUTE) {
            attributes.insert(PASSWORD_ATTRIBUTE.to_string(), password.clone());
        }
        Ok(attributes)
    })
}

/// Resolves every user to an empty list.
pub fn empty_list() -> ListResolver {
    list_resolver_fn(|_user| async { Ok(Vec::new()) })
}

/// Time-ordered UUID v7 ids.
pub fn uuid_v7_ids() -> GenerateIdFn {
    generate_id_fn(|| async { Ok(Some(Uuid::now_v7().to_string())) })
}
