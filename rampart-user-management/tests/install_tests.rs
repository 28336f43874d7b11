//! End-to-end installation into a host application.

mod common;

use common::{add_session, init_tracing, processor, user_schema};
use pretty_assertions::assert_eq;
use rampart_host::{Application, DiagnosticLevel, HostError};
use rampart_model::{AttributeSet, Cardinality, Relationship, Resource, ResourceSchema};
use rampart_user_management::*;

fn install(options: UserManagementOptions) -> Application {
    init_tracing();
    let mut app = Application::new();
    app.use_addon(UserManagementAddon::new(options)).unwrap();
    app
}

// ── Registration ─────────────────────────────────────────────────

#[test]
fn registers_two_types_and_two_processors() {
    let app = install(UserManagementOptions::new(user_schema()));

    assert_eq!(app.types().names(), vec!["user", "session"]);
    assert_eq!(app.processors().resource_types(), vec!["user", "session"]);
}

#[test]
fn session_relationship_resolves_to_user_type() {
    let app = install(UserManagementOptions::new(user_schema()));

    let (rel, target) = app
        .types()
        .resolve_relationship(SESSION_TYPE, USER_RELATIONSHIP)
        .unwrap();
    assert_eq!(target.type_name, "user");
    assert_eq!(rel.foreign_key.as_deref(), Some(USER_FOREIGN_KEY));
}

#[test]
fn renamed_user_type_is_followed() {
    let account = ResourceSchema::new("account");
    let app = install(UserManagementOptions::new(account));

    assert_eq!(app.types().names(), vec!["account", "session"]);
    assert!(app.processors().for_type("account").is_some());
    let (_, target) = app
        .types()
        .resolve_relationship(SESSION_TYPE, USER_RELATIONSHIP)
        .unwrap();
    assert_eq!(target.type_name, "account");
}

#[test]
fn user_type_may_link_back_to_sessions() {
    let user = user_schema().relationship("sessions", Relationship::has_many(SESSION_TYPE));
    let app = install(UserManagementOptions::new(user));

    assert_eq!(app.types().names(), vec!["user", "session"]);
    assert!(app.types().unresolved().is_empty());

    let (rel, target) = app.types().resolve_relationship("user", "sessions").unwrap();
    assert_eq!(rel.cardinality, Cardinality::Many);
    assert_eq!(target.type_name, SESSION_TYPE);
    let (_, target) = app
        .types()
        .resolve_relationship(SESSION_TYPE, USER_RELATIONSHIP)
        .unwrap();
    assert_eq!(target.type_name, "user");
}

#[test]
fn dangling_user_relationship_fails_install() {
    init_tracing();
    let user = user_schema().relationship("groups", Relationship::has_many("group"));
    let mut app = Application::new();

    let err = app
        .use_addon(UserManagementAddon::new(UserManagementOptions::new(user)))
        .unwrap_err();

    assert!(matches!(
        err,
        HostError::UnresolvedRelationship { ref target, .. } if target == "group"
    ));
    assert_eq!(app.processors().len(), 2);
}

// ── Default login ────────────────────────────────────────────────

#[tokio::test]
async fn default_login_always_permits_and_warns_once() {
    let app = install(UserManagementOptions::new(user_schema()));
    let session = processor(&app, SESSION_TYPE);

    for (username, password) in [("ferris", "right"), ("ferris", "wrong"), ("", "")] {
        let op = add_session(&[("username", username), ("password", password)]);
        assert!(session.login(&op, &AttributeSet::new()).await.unwrap());
    }

    assert_eq!(app.diagnostics().count(codes::UNSAFE_DEFAULT_LOGIN), 1);
    assert_eq!(app.diagnostics().count(codes::UNSAFE_DEFAULT_PASSWORD), 1);
    assert!(app.diagnostics().warnings().all(|d| d.source == ADDON_NAME));
}

#[test]
fn configured_callbacks_raise_no_warnings() {
    let app = install(
        UserManagementOptions::new(user_schema())
            .user_login_callback(|_, _| async { Ok(false) })
            .user_encrypt_password_callback(|_| async { Ok(AttributeSet::new()) }),
    );
    assert_eq!(app.diagnostics().warnings().count(), 0);
}

// ── Services ─────────────────────────────────────────────────────

#[tokio::test]
async fn default_services_resolve_to_empty_lists() {
    let app = install(UserManagementOptions::new(user_schema()));
    let user = Resource::new("user").with_id("1");

    let roles = app.services().resolve_list(ROLES_SERVICE, user.clone()).await.unwrap();
    let permissions = app
        .services()
        .resolve_list(PERMISSIONS_SERVICE, user)
        .await
        .unwrap();
    assert!(roles.is_empty());
    assert!(permissions.is_empty());
}

#[tokio::test]
async fn services_return_provider_output() {
    let app = install(
        UserManagementOptions::new(user_schema())
            .user_roles_provider(|user: Resource| async move {
                let role = if user.get_str("username") == Some("root") {
                    "admin"
                } else {
                    "member"
                };
                Ok(vec![role.to_string()])
            })
            .user_permissions_provider(|_| async {
                Ok(vec!["article:read".to_string(), "article:write".to_string()])
            }),
    );

    let root = Resource::new("user").with_attribute("username", serde_json::json!("root"));
    let guest = Resource::new("user").with_attribute("username", serde_json::json!("guest"));

    let services = app.services();
    assert_eq!(services.resolve_list(ROLES_SERVICE, root.clone()).await.unwrap(), vec!["admin"]);
    assert_eq!(services.resolve_list(ROLES_SERVICE, guest).await.unwrap(), vec!["member"]);
    assert_eq!(
        services.resolve_list(PERMISSIONS_SERVICE, root).await.unwrap(),
        vec!["article:read", "article:write"]
    );
}

// ── Field names ──────────────────────────────────────────────────

#[test]
fn colliding_field_names_warn_but_install() {
    let app = install(
        UserManagementOptions::new(user_schema())
            .username_request_parameter("token")
            .password_request_parameter("token"),
    );

    assert_eq!(app.diagnostics().count(codes::FIELD_NAME_COLLISION), 3);
    let session = app.types().get(SESSION_TYPE).unwrap();
    assert_eq!(session.attributes.len(), 1);
}

#[test]
fn custom_processor_reports_ignored_callbacks() {
    struct Opaque;
    impl UserIdentityPolicy for Opaque {}

    let app = install(
        UserManagementOptions::new(user_schema())
            .user_processor(Opaque)
            .user_encrypt_password_callback(|_| async { Ok(AttributeSet::new()) }),
    );

    let ignored: Vec<_> = app
        .diagnostics()
        .events()
        .iter()
        .filter(|d| d.code == codes::IGNORED_IDENTITY_CALLBACKS)
        .collect();
    assert_eq!(ignored.len(), 1);
    assert_eq!(ignored[0].level, DiagnosticLevel::Info);
    assert_eq!(app.diagnostics().count(codes::UNSAFE_DEFAULT_PASSWORD), 0);
}

// ── Failure ──────────────────────────────────────────────────────

#[test]
fn failed_install_keeps_earlier_registrations() {
    init_tracing();
    let mut app = Application::new();
    app.register_type(user_schema()).unwrap();

    let err = app
        .use_addon(UserManagementAddon::new(UserManagementOptions::new(user_schema())))
        .unwrap_err();

    assert!(matches!(err, HostError::DuplicateType(ref t) if t == "user"));
    assert!(app.services().contains(ROLES_SERVICE));
    assert!(app.services().contains(PERMISSIONS_SERVICE));
    assert_eq!(app.types().names(), vec!["user"]);
    assert!(app.processors().is_empty());
}

#[test]
fn second_instance_conflicts_with_first() {
    let mut app = install(UserManagementOptions::new(user_schema()));
    let err = app
        .use_addon(UserManagementAddon::new(UserManagementOptions::new(user_schema())))
        .unwrap_err();
    assert!(matches!(err, HostError::DuplicateType(_)));
    assert_eq!(app.processors().len(), 2);
}
