//! Selection and behavior of the composed user processor.

mod common;

use async_trait::async_trait;
use common::{add_user, processor, user_schema};
use rampart_host::{Application, HostError, Processor};
use rampart_model::{AttributeSet, Operation};
use rampart_user_management::*;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn install(options: UserManagementOptions) -> Arc<dyn Processor> {
    let mut app = Application::new();
    app.use_addon(UserManagementAddon::new(options)).unwrap();
    processor(&app, "user")
}

fn hashed(op: &Operation) -> AttributeSet {
    let plain = op.get_str("password").unwrap_or_default();
    let mut attrs = AttributeSet::new();
    attrs.insert("password".into(), json!(format!("hashed:{plain}")));
    attrs.insert("salt".into(), json!("s1"));
    attrs
}

// ── Built-in processor ───────────────────────────────────────────

#[tokio::test]
async fn supplied_encrypt_callback_result_is_returned() {
    let users = install(
        UserManagementOptions::new(user_schema())
            .user_encrypt_password_callback(|op: Operation| async move { Ok(hashed(&op)) }),
    );

    let op = add_user("ferris", "hunter2");
    assert_eq!(users.encrypt_password(&op).await.unwrap(), hashed(&op));
}

#[tokio::test]
async fn default_encrypt_without_password_is_empty() {
    let users = install(UserManagementOptions::new(user_schema()));
    let op = common::add_session(&[("username", "ferris")]);
    assert!(users.encrypt_password(&op).await.unwrap().is_empty());
}

#[tokio::test]
async fn default_encrypt_returns_plaintext() {
    let users = install(UserManagementOptions::new(user_schema()));
    let attrs = users
        .encrypt_password(&add_user("ferris", "hunter2"))
        .await
        .unwrap();
    assert_eq!(attrs.get("password"), Some(&json!("hunter2")));
    assert_eq!(attrs.len(), 1);
}

#[tokio::test]
async fn without_generator_no_id_is_produced() {
    let users = install(UserManagementOptions::new(user_schema()));
    assert_eq!(users.generate_id().await.unwrap(), None);
}

#[tokio::test]
async fn supplied_generator_is_used() {
    let counter = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&counter);
    let users = install(
        UserManagementOptions::new(user_schema()).user_generate_id_callback(move || {
            let n = c.fetch_add(1, Ordering::SeqCst);
            async move { Ok(Some(format!("user-{n}"))) }
        }),
    );

    assert_eq!(users.generate_id().await.unwrap().as_deref(), Some("user-0"));
    assert_eq!(users.generate_id().await.unwrap().as_deref(), Some("user-1"));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn callback_failure_propagates() {
    let users = install(
        UserManagementOptions::new(user_schema())
            .user_encrypt_password_callback(|_| async { Err(anyhow::anyhow!("kms timeout")) }),
    );
    let err = users
        .encrypt_password(&add_user("ferris", "pw"))
        .await
        .unwrap_err();
    assert!(matches!(err, HostError::Callback(_)));
    assert_eq!(err.to_string(), "kms timeout");
}

// ── Custom processor ─────────────────────────────────────────────

struct Sequential {
    next: AtomicUsize,
}

#[async_trait]
impl UserIdentityPolicy for Sequential {
    async fn generate_id(&self) -> PolicyResult<Option<String>> {
        Ok(Some(format!("seq-{}", self.next.fetch_add(1, Ordering::SeqCst))))
    }

    async fn encrypt_password(&self, op: &Operation) -> PolicyResult<AttributeSet> {
        let mut attrs = AttributeSet::new();
        let reversed: String = op.get_str("password").unwrap_or_default().chars().rev().collect();
        attrs.insert("password".into(), json!(reversed));
        Ok(attrs)
    }
}

#[tokio::test]
async fn custom_processor_ignores_callbacks() {
    let users = install(
        UserManagementOptions::new(user_schema())
            .user_processor(Sequential {
                next: AtomicUsize::new(0),
            })
            .user_generate_id_callback(|| async { Ok(Some("from-callback".to_string())) })
            .user_encrypt_password_callback(|_| async { Ok(AttributeSet::new()) }),
    );
    let reference = Sequential {
        next: AtomicUsize::new(0),
    };

    let op = add_user("ferris", "abc");
    assert_eq!(
        users.generate_id().await.unwrap(),
        reference.generate_id().await.unwrap()
    );
    assert_eq!(
        users.encrypt_password(&op).await.unwrap(),
        reference.encrypt_password(&op).await.unwrap()
    );
    assert_eq!(users.encrypt_password(&op).await.unwrap()["password"], json!("cba"));
}

struct IdOnly;

#[async_trait]
impl UserIdentityPolicy for IdOnly {
    async fn generate_id(&self) -> PolicyResult<Option<String>> {
        Ok(Some("fixed".to_string()))
    }
}

#[tokio::test]
async fn missing_custom_operation_fails_on_call() {
    let users = install(UserManagementOptions::new(user_schema()).user_processor(IdOnly));

    assert_eq!(users.generate_id().await.unwrap().as_deref(), Some("fixed"));
    let err = users
        .encrypt_password(&add_user("ferris", "pw"))
        .await
        .unwrap_err();
    let HostError::Invocation {
        resource_type,
        operation,
    } = &err
    else {
        panic!("expected an invocation error, got {err:?}");
    };
    assert_eq!(resource_type, "user");
    assert_eq!(*operation, "encrypt_password");
}

// ── prepare_add ──────────────────────────────────────────────────

#[tokio::test]
async fn prepare_add_applies_id_and_encryption() {
    let options = UserManagementOptions::new(user_schema())
        .user_generate_id_callback(|| async { Ok(Some("u-1".to_string())) })
        .user_encrypt_password_callback(|op: Operation| async move { Ok(hashed(&op)) })
        .resolve();
    let users = compose_user_processor(&options);

    let prepared = users.prepare_add(add_user("ferris", "pw")).await.unwrap();
    let data = prepared.data.unwrap();
    assert_eq!(data.id.as_deref(), Some("u-1"));
    assert_eq!(data.get_str("username"), Some("ferris"));
    assert_eq!(data.get_str("password"), Some("hashed:pw"));
    assert_eq!(data.get_str("salt"), Some("s1"));
}

#[tokio::test]
async fn prepare_add_keeps_store_assigned_ids() {
    let options = UserManagementOptions::new(user_schema()).resolve();
    let users = compose_user_processor(&options);

    let prepared = users.prepare_add(add_user("ferris", "pw")).await.unwrap();
    assert!(prepared.data.unwrap().id.is_none());
}

#[tokio::test]
async fn uuid_helper_produces_ids() {
    let options = UserManagementOptions::new(user_schema())
        .user_generate_id(uuid_v7_ids())
        .resolve();
    let users = compose_user_processor(&options);
    let id = users.generate_id().await.unwrap().unwrap();
    assert_eq!(id.len(), 36);
}
