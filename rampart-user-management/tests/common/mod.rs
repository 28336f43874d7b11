#![allow(dead_code)]

use rampart_host::{Application, Processor};
use rampart_model::{AttributeType, Operation, Resource, ResourceSchema};
use serde_json::json;
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

/// Routes `tracing` output through the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn user_schema() -> ResourceSchema {
    ResourceSchema::new("user")
        .attribute("username", AttributeType::String)
        .attribute("email", AttributeType::String)
        .attribute("password", AttributeType::Password)
}

pub fn add_user(username: &str, password: &str) -> Operation {
    Operation::add(
        Resource::new("user")
            .with_attribute("username", json!(username))
            .with_attribute("password", json!(password)),
    )
}

pub fn add_session(fields: &[(&str, &str)]) -> Operation {
    let mut session = Resource::new("session");
    for (name, value) in fields {
        session = session.with_attribute(*name, json!(value));
    }
    Operation::add(session)
}

pub fn processor(app: &Application, resource_type: &str) -> Arc<dyn Processor> {
    app.processors()
        .for_type(resource_type)
        .unwrap_or_else(|| panic!("no processor for {resource_type}"))
}
