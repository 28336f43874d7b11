//! The session resource type.

use crate::options::ResolvedOptions;
use rampart_model::{AttributeType, Relationship, ResourceSchema};

pub const SESSION_TYPE: &str = "session";
pub const TOKEN_ATTRIBUTE: &str = "token";
pub const USER_RELATIONSHIP: &str = "user";
pub const USER_FOREIGN_KEY: &str = "user_id";

/// Builds the session schema from the configured field names.
///
/// Names are used verbatim. On a collision the later declaration wins, in
/// the order token, username, password.
pub fn session_schema(options: &ResolvedOptions) -> ResourceSchema {
    ResourceSchema::new(SESSION_TYPE)
        .attribute(TOKEN_ATTRIBUTE, AttributeType::String)
        .attribute(
            options.username_request_parameter.as_str(),
            AttributeType::String,
        )
        .attribute(
            options.password_request_parameter.as_str(),
            AttributeType::Password,
        )
        .relationship(
            USER_RELATIONSHIP,
            Relationship::belongs_to(options.user_resource.type_name.as_str(), USER_FOREIGN_KEY),
        )
}

/// Describes every pair of session attribute names that coincide.
pub fn field_name_collisions(username_field: &str, password_field: &str) -> Vec<String> {
    let mut collisions = Vec::new();
    if username_field == password_field {
        collisions.push(format!(
            "username and password request parameters are both '{username_field}'"
        ));
    }
    if username_field == TOKEN_ATTRIBUTE {
        collisions.push(format!(
            "username request parameter '{username_field}' shadows the session token"
        ));
    }
    if password_field == TOKEN_ATTRIBUTE {
        collisions.push(format!(
            "password request parameter '{password_field}' shadows the session token"
        ));
    }
    collisions
}
