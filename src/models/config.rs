//! Configuration model loaded from external sources.

use std::time::Duration;

use chrono::TimeDelta;
use serde::Deserialize;

use crate::actions::ActionSettings;
use crate::actions::normalizer::ErrorSanitizer;

/// Deployment environment. Controls how much error detail reaches callers.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

fn default_upload_timeout_secs() -> u64 {
    45
}

fn default_session_ttl_hours() -> i64 {
    24
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Signs the session cookie and the session token. At least 64 bytes.
    pub secret: String,
    pub backend_api_url: String,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
}

impl ServerConfig {
    pub fn action_settings(&self) -> ActionSettings {
        let sanitizer = match self.environment {
            Environment::Development => ErrorSanitizer::development(),
            Environment::Production => ErrorSanitizer::production(),
        };
        ActionSettings {
            sanitizer,
            upload_timeout: Duration::from_secs(self.upload_timeout_secs),
        }
    }

    /// Session lifetime, or `None` when `session_ttl_hours` is not a positive
    /// number of hours chrono can represent.
    pub fn session_ttl(&self) -> Option<TimeDelta> {
        TimeDelta::try_hours(self.session_ttl_hours).filter(|ttl| *ttl > TimeDelta::zero())
    }
}
