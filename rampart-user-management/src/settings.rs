//! File-backed settings for the addon's string options.
//!
//! ```toml
//! username_request_parameter = "email"
//! password_request_parameter = "passphrase"
//! ```

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub const DEFAULT_USERNAME_FIELD: &str = "username";
pub const DEFAULT_PASSWORD_FIELD: &str = "password";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonSettings {
    /// Session attribute carrying the login name.
    #[serde(default = "default_username_field")]
    pub username_request_parameter: String,
    /// Session attribute carrying the password.
    #[serde(default = "default_password_field")]
    pub password_request_parameter: String,
}

fn default_username_field() -> String {
    DEFAULT_USERNAME_FIELD.to_string()
}

fn default_password_field() -> String {
    DEFAULT_PASSWORD_FIELD.to_string()
}

impl Default for AddonSettings {
    fn default() -> Self {
        Self {
            username_request_parameter: default_username_field(),
            password_request_parameter: default_password_field(),
        }
    }
}

impl AddonSettings {
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads settings from a TOML file. Missing keys take their defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&contents)?;
        info!(path = ?path, "Loaded user management settings");
        Ok(settings)
    }
}
