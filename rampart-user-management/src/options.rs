//! Addon options and their merge with the built-in defaults.

use crate::callbacks::{
    EncryptPasswordFn, GenerateIdFn, LoginFn, empty_list, encrypt_password_fn, generate_id_fn,
    list_resolver_fn, login_fn, permit_all_login, plaintext_password,
};
use crate::policy::UserIdentityPolicy;
use crate::settings::{AddonSettings, DEFAULT_PASSWORD_FIELD, DEFAULT_USERNAME_FIELD};
use rampart_host::ListResolver;
use rampart_model::{AttributeSet, Operation, Resource, ResourceSchema};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Which processor handles the user resource.
#[derive(Clone, Default)]
pub enum UserProcessorKind {
    /// The built-in processor, driven by the identity callbacks.
    #[default]
    BuiltIn,
    /// A deployer processor carrying its own identity policy. Identity
    /// callbacks are ignored when this is selected.
    Custom(Arc<dyn UserIdentityPolicy>),
}

impl UserProcessorKind {
    /// True for the built-in processor.
    pub fn is_built_in(&self) -> bool {
        matches!(self, Self::BuiltIn)
    }
}

impl fmt::Debug for UserProcessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltIn => f.write_str("BuiltIn"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Deployer-supplied options. Everything except the user resource is optional.
#[derive(Clone)]
pub struct UserManagementOptions {
    user_resource: ResourceSchema,
    user_processor: Option<UserProcessorKind>,
    user_encrypt_password_callback: Option<EncryptPasswordFn>,
    user_login_callback: Option<LoginFn>,
    user_generate_id_callback: Option<GenerateIdFn>,
    user_roles_provider: Option<ListResolver>,
    user_permissions_provider: Option<ListResolver>,
    username_request_parameter: Option<String>,
    password_request_parameter: Option<String>,
}

impl UserManagementOptions {
    /// Starts from `user_resource` with every other option unset.
    pub fn new(user_resource: ResourceSchema) -> Self {
        Self {
            user_resource,
            user_processor: None,
            user_encrypt_password_callback: None,
            user_login_callback: None,
            user_generate_id_callback: None,
            user_roles_provider: None,
            user_permissions_provider: None,
            username_request_parameter: None,
            password_request_parameter: None,
        }
    }

    /// Replaces the built-in user processor with a custom identity policy.
    pub fn user_processor<P: UserIdentityPolicy + 'static>(mut self, policy: P) -> Self {
        self.user_processor = Some(UserProcessorKind::Custom(Arc::new(policy)));
        self
    }

    /// Selects the user processor explicitly.
    pub fn user_processor_kind(mut self, kind: UserProcessorKind) -> Self {
        self.user_processor = Some(kind);
        self
    }

    /// Maps a user operation to the attributes stored instead of its plaintext password.
    pub fn user_encrypt_password_callback<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Operation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<AttributeSet>> + Send + 'static,
    {
        self.user_encrypt_password_callback = Some(encrypt_password_fn(f));
        self
    }

    /// Decides whether a session may be created for a user.
    pub fn user_login_callback<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Operation, AttributeSet) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
    {
        self.user_login_callback = Some(login_fn(f));
        self
    }

    /// Produces ids for new users.
    pub fn user_generate_id_callback<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Option<String>>> + Send + 'static,
    {
        self.user_generate_id_callback = Some(generate_id_fn(f));
        self
    }

    /// Sets an already-built id generator, e.g. [`crate::uuid_v7_ids`].
    pub fn user_generate_id(mut self, generate: GenerateIdFn) -> Self {
        self.user_generate_id_callback = Some(generate);
        self
    }

    /// Resolves a user's roles, served as the `roles` service.
    pub fn user_roles_provider<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Resource) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Vec<String>>> + Send + 'static,
    {
        self.user_roles_provider = Some(list_resolver_fn(f));
        self
    }

    /// Resolves a user's permissions, served as the `permissions` service.
    pub fn user_permissions_provider<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Resource) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Vec<String>>> + Send + 'static,
    {
        self.user_permissions_provider = Some(list_resolver_fn(f));
        self
    }

    /// Session attribute carrying the login name.
    pub fn username_request_parameter(mut self, name: impl Into<String>) -> Self {
        self.username_request_parameter = Some(name.into());
        self
    }

    /// Session attribute carrying the password.
    pub fn password_request_parameter(mut self, name: impl Into<String>) -> Self {
        self.password_request_parameter = Some(name.into());
        self
    }

    /// Applies both request parameter names from loaded settings.
    pub fn with_settings(self, settings: AddonSettings) -> Self {
        self.username_request_parameter(settings.username_request_parameter)
            .password_request_parameter(settings.password_request_parameter)
    }

    /// Overlays the supplied options onto the defaults.
    ///
    /// A supplied option always wins; nothing is validated here.
    pub fn resolve(self) -> ResolvedOptions {
        let login_defaulted = self.user_login_callback.is_none();
        let encrypt_password_defaulted = self.user_encrypt_password_callback.is_none();
        let identity_callbacks_supplied =
            self.user_generate_id_callback.is_some() || !encrypt_password_defaulted;

        ResolvedOptions {
            user_resource: self.user_resource,
            user_processor: self.user_processor.unwrap_or_default(),
            encrypt_password: self
                .user_encrypt_password_callback
                .unwrap_or_else(plaintext_password),
            login: self.user_login_callback.unwrap_or_else(permit_all_login),
            generate_id: self.user_generate_id_callback,
            roles_provider: self.user_roles_provider.unwrap_or_else(empty_list),
            permissions_provider: self.user_permissions_provider.unwrap_or_else(empty_list),
            username_request_parameter: self
                .username_request_parameter
                .unwrap_or_else(|| DEFAULT_USERNAME_FIELD.to_string()),
            password_request_parameter: self
                .password_request_parameter
                .unwrap_or_else(|| DEFAULT_PASSWORD_FIELD.to_string()),
            login_defaulted,
            encrypt_password_defaulted,
            identity_callbacks_supplied,
        }
    }
}

/// Options after the merge: every field with a default is populated.
#[derive(Clone)]
pub struct ResolvedOptions {
    pub user_resource: ResourceSchema,
    pub user_processor: UserProcessorKind,
    pub encrypt_password: EncryptPasswordFn,
    pub login: LoginFn,
    /// No default: without a generator the store assigns ids.
    pub generate_id: Option<GenerateIdFn>,
    pub roles_provider: ListResolver,
    pub permissions_provider: ListResolver,
    pub username_request_parameter: String,
    pub password_request_parameter: String,
    login_defaulted: bool,
    encrypt_password_defaulted: bool,
    identity_callbacks_supplied: bool,
}

impl ResolvedOptions {
    /// True when the permit-all login default is in use.
    pub fn uses_default_login(&self) -> bool {
        self.login_defaulted
    }

    /// True when the plaintext password default will actually run, i.e. the
    /// built-in processor is selected and no callback was supplied.
    pub fn uses_default_password_encryption(&self) -> bool {
        self.encrypt_password_defaulted && self.user_processor.is_built_in()
    }

    /// True when identity callbacks were supplied but a custom processor
    /// makes them irrelevant.
    pub fn ignores_identity_callbacks(&self) -> bool {
        self.identity_callbacks_supplied && !self.user_processor.is_built_in()
    }
}

impl fmt::Debug for ResolvedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedOptions")
            .field("user_resource", &self.user_resource.type_name)
            .field("user_processor", &self.user_processor)
            .field("generate_id", &self.generate_id.is_some())
            .field("username_request_parameter", &self.username_request_parameter)
            .field("password_request_parameter", &self.password_request_parameter)
            .field("login_defaulted", &self.login_defaulted)
            .field("encrypt_password_defaulted", &self.encrypt_password_defaulted)
            .finish_non_exhaustive()
    }
}
