//! User and session management addon for the Rampart host.
//!
//! Installing [`UserManagementAddon`] registers:
//! - the deployer's user resource and a `session` resource linked to it
//! - a [`UserProcessor`] that generates ids and encrypts passwords
//! - a [`SessionProcessor`] whose login check runs the configured callback
//! - `roles` and `permissions` resolvers in the host's service registry
//!
//! Behavior is injected through [`UserManagementOptions`]. Callbacks extend
//! the built-in user processor; a custom [`UserIdentityPolicy`] replaces it.
//! Options left unset fall back to development defaults (permit-all login,
//! plaintext passwords) that raise warnings in the host diagnostics.

mod addon;
mod callbacks;
mod error;
mod options;
mod policy;
mod session;
mod session_processor;
mod settings;
mod user_processor;

pub use addon::{ADDON_NAME, PERMISSIONS_SERVICE, ROLES_SERVICE, UserManagementAddon, codes};
pub use callbacks::{
    EncryptPasswordFn, GenerateIdFn, LoginFn, PASSWORD_ATTRIBUTE, empty_list, encrypt_password_fn,
    generate_id_fn, list_resolver_fn, login_fn, permit_all_login, plaintext_password, uuid_v7_ids,
};
pub use error::{PolicyError, PolicyResult, SettingsError};
pub use options::{ResolvedOptions, UserManagementOptions, UserProcessorKind};
pub use policy::{CallbackIdentityPolicy, CallbackLoginPolicy, LoginPolicy, UserIdentityPolicy};
pub use session::{
    SESSION_TYPE, TOKEN_ATTRIBUTE, USER_FOREIGN_KEY, USER_RELATIONSHIP, field_name_collisions,
    session_schema,
};
pub use session_processor::{SessionProcessor, compose_session_processor};
pub use settings::{AddonSettings, DEFAULT_PASSWORD_FIELD, DEFAULT_USERNAME_FIELD};
pub use user_processor::{UserProcessor, compose_user_processor};
