//! Capabilities injected into the composed processors.
//!
//! - [`UserIdentityPolicy`]: id generation and password encryption for users
//! - [`LoginPolicy`]: the login check performed before a session is created
//!
//! Every operation defaults to [`PolicyError::NotImplemented`], so a custom
//! policy that skips one fails when that operation is called, not at install.

use crate::callbacks::{EncryptPasswordFn, GenerateIdFn, LoginFn};
use crate::error::{PolicyError, PolicyResult};
use async_trait::async_trait;
use rampart_model::{AttributeSet, Operation};

#[async_trait]
pub trait UserIdentityPolicy: Send + Sync {
    async fn generate_id(&self) -> PolicyResult<Option<String>> {
        Err(PolicyError::NotImplemented("generate_id"))
    }

    async fn encrypt_password(&self, op: &Operation) -> PolicyResult<AttributeSet> {
        let _ = op;
        Err(PolicyError::NotImplemented("encrypt_password"))
    }
}

#[async_trait]
pub trait LoginPolicy: Send + Sync {
    async fn login(&self, op: &Operation, user: &AttributeSet) -> PolicyResult<bool> {
        let _ = (op, user);
        Err(PolicyError::NotImplemented("login"))
    }
}

/// Identity policy backed by deployer callbacks.
///
/// Without a generate-id callback no id is produced.
pub struct CallbackIdentityPolicy {
    generate_id: Option<GenerateIdFn>,
    encrypt_password: EncryptPasswordFn,
}

impl CallbackIdentityPolicy {
    pub fn new(generate_id: Option<GenerateIdFn>, encrypt_password: EncryptPasswordFn) -> Self {
        Self {
            generate_id,
            encrypt_password,
        }
    }
}

#[async_trait]
impl UserIdentityPolicy for CallbackIdentityPolicy {
    async fn generate_id(&self) -> PolicyResult<Option<String>> {
        match &self.generate_id {
            Some(generate) => Ok(generate().await?),
            None => Ok(None),
        }
    }

    async fn encrypt_password(&self, op: &Operation) -> PolicyResult<AttributeSet> {
        Ok((self.encrypt_password)(op.clone()).await?)
    }
}

/// Login policy backed by a deployer callback.
pub struct CallbackLoginPolicy {
    login: LoginFn,
}

impl CallbackLoginPolicy {
    pub fn new(login: LoginFn) -> Self {
        Self { login }
    }
}

#[async_trait]
impl LoginPolicy for CallbackLoginPolicy {
    async fn login(&self, op: &Operation, user: &AttributeSet) -> PolicyResult<bool> {
        Ok((self.login)(op.clone(), user.clone()).await?)
    }
}
