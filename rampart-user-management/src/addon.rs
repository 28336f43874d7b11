//! Installation of the user management addon into a host application.

use crate::options::{ResolvedOptions, UserManagementOptions};
use crate::session::{field_name_collisions, session_schema};
use crate::session_processor::compose_session_processor;
use crate::user_processor::compose_user_processor;
use rampart_host::{Addon, Application, Diagnostic, HostResult};
use std::sync::Arc;
use tracing::info;

pub const ADDON_NAME: &str = "user-management";

/// Service key of the roles resolver.
pub const ROLES_SERVICE: &str = "roles";
/// Service key of the permissions resolver.
pub const PERMISSIONS_SERVICE: &str = "permissions";

/// Diagnostic codes raised during installation.
pub mod codes {
    pub const UNSAFE_DEFAULT_LOGIN: &str = "unsafe-default-login";
    pub const UNSAFE_DEFAULT_PASSWORD: &str = "unsafe-default-password";
    pub const FIELD_NAME_COLLISION: &str = "field-name-collision";
    pub const IGNORED_IDENTITY_CALLBACKS: &str = "ignored-identity-callbacks";
}

/// Adds a user resource, a session resource bound to it, and the processors
/// that create users and check logins.
///
/// ```
/// use rampart_host::Application;
/// use rampart_model::{AttributeType, ResourceSchema};
/// use rampart_user_management::{UserManagementAddon, UserManagementOptions};
///
/// let user = ResourceSchema::new("user")
///     .attribute("username", AttributeType::String)
///     .attribute("password", AttributeType::Password);
///
/// let mut app = Application::new();
/// app.use_addon(UserManagementAddon::new(UserManagementOptions::new(user)))
///     .unwrap();
/// assert_eq!(app.types().names(), vec!["user", "session"]);
/// ```
#[derive(Debug)]
pub struct UserManagementAddon {
    options: ResolvedOptions,
}

impl UserManagementAddon {
    pub fn new(options: UserManagementOptions) -> Self {
        Self {
            options: options.resolve(),
        }
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }
}

impl Addon for UserManagementAddon {
    fn name(&self) -> &'static str {
        ADDON_NAME
    }

    /// Registration order: services, user type, session type, user
    /// processor, session processor. Nothing is undone on failure.
    fn install(self, app: &mut Application) -> HostResult<()> {
        let options = self.options;

        let session = session_schema(&options);
        for collision in field_name_collisions(
            &options.username_request_parameter,
            &options.password_request_parameter,
        ) {
            app.diagnostics_mut().emit(Diagnostic::warning(
                ADDON_NAME,
                codes::FIELD_NAME_COLLISION,
                collision,
            ));
        }

        let services = app.services_mut();
        services.insert(ROLES_SERVICE, Arc::clone(&options.roles_provider));
        services.insert(PERMISSIONS_SERVICE, Arc::clone(&options.permissions_provider));

        app.register_type(options.user_resource.clone())?;
        app.register_type(session.clone())?;

        if options.uses_default_password_encryption() {
            app.diagnostics_mut().emit(Diagnostic::warning(
                ADDON_NAME,
                codes::UNSAFE_DEFAULT_PASSWORD,
                "no password encryption callback configured: passwords are stored in plaintext",
            ));
        }
        if options.ignores_identity_callbacks() {
            app.diagnostics_mut().emit(Diagnostic::info(
                ADDON_NAME,
                codes::IGNORED_IDENTITY_CALLBACKS,
                "custom user processor configured: id and password callbacks are ignored",
            ));
        }
        app.register_processor(Arc::new(compose_user_processor(&options)))?;

        if options.uses_default_login() {
            app.diagnostics_mut().emit(Diagnostic::warning(
                ADDON_NAME,
                codes::UNSAFE_DEFAULT_LOGIN,
                "no login callback configured: every login attempt succeeds",
            ));
        }
        app.register_processor(Arc::new(compose_session_processor(&options, &session)))?;

        info!(
            user_type = %options.user_resource.type_name,
            session_type = %session.type_name,
            username_field = %options.username_request_parameter,
            password_field = %options.password_request_parameter,
            "User management installed"
        );
        Ok(())
    }
}
