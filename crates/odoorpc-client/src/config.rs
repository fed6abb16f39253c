//! Client configuration
//!
//! Loaded from TOML, then overridden from the environment:
//!
//! ```toml
//! base_url = "https://odoo.example.com"
//! timeout_secs = 30
//! log_profile = "production"
//! ```
//!
//! | variable              | overrides     |
//! |-----------------------|---------------|
//! | `ODOORPC_BASE_URL`    | `base_url`    |
//! | `ODOORPC_LOG_PROFILE` | `log_profile` |

use std::path::Path;
use std::time::Duration;

use odoorpc_core::domain::{DomainBuilder, CHANNEL_MODEL, MESSAGE_MODEL};
use odoorpc_core::logging_facility::{self, Profile};
use odoorpc_core::RpcError;
use serde::Deserialize;

use crate::errors::{config_error, config_field_error};

pub const ENV_BASE_URL: &str = "ODOORPC_BASE_URL";
pub const ENV_LOG_PROFILE: &str = "ODOORPC_LOG_PROFILE";

pub const DEFAULT_SEARCH_READ_PATH: &str = "/web/dataset/search_read";
pub const DEFAULT_CALL_KW_PATH: &str = "/web/dataset/call_kw";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_search_read_path() -> String {
    DEFAULT_SEARCH_READ_PATH.to_string()
}

fn default_call_kw_path() -> String {
    DEFAULT_CALL_KW_PATH.to_string()
}

fn default_message_model() -> String {
    MESSAGE_MODEL.to_string()
}

fn default_container_model() -> String {
    CHANNEL_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_profile() -> Profile {
    Profile::Production
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default = "default_search_read_path")]
    pub search_read_path: String,
    #[serde(default = "default_call_kw_path")]
    pub call_kw_path: String,
    #[serde(default = "default_message_model")]
    pub message_model: String,
    #[serde(default = "default_container_model")]
    pub container_model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_log_profile")]
    pub log_profile: Profile,
}

impl ClientConfig {
    /// Defaults for everything except the base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            search_read_path: default_search_read_path(),
            call_kw_path: default_call_kw_path(),
            message_model: default_message_model(),
            container_model: default_container_model(),
            timeout_secs: default_timeout_secs(),
            log_profile: default_log_profile(),
        }
    }

    /// Parse a TOML document without validating it
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the document is not valid TOML or does not
    /// match the configuration schema.
    pub fn from_toml_str(content: &str) -> Result<Self, RpcError> {
        toml::from_str(content).map_err(|e| config_error(format!("invalid config format: {}", e)))
    }

    /// Read a TOML file, apply environment overrides and validate
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file cannot be read or parsed, an
    /// override is invalid, or the result fails [`ClientConfig::validate`].
    pub fn load(path: &Path) -> Result<Self, RpcError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            config_error(format!(
                "unable to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides()?;
        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            base_url = %config.base_url,
            log_profile = ?config.log_profile,
            "loaded client config"
        );
        Ok(config)
    }

    /// Apply overrides from the process environment
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if `ODOORPC_LOG_PROFILE` names no profile.
    pub fn apply_env_overrides(&mut self) -> Result<(), RpcError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the log profile override names no profile.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), RpcError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(name) = lookup(ENV_LOG_PROFILE) {
            self.log_profile = Profile::from_name(&name).ok_or_else(|| {
                config_field_error(
                    "log_profile",
                    format!("unknown log profile '{}' in {}", name, ENV_LOG_PROFILE),
                )
            })?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a `Config` error naming the first invalid setting.
    pub fn validate(&self) -> Result<(), RpcError> {
        if self.base_url.trim().is_empty() {
            return Err(config_field_error("base_url", "base_url must not be empty"));
        }
        for (field, path) in [
            ("search_read_path", &self.search_read_path),
            ("call_kw_path", &self.call_kw_path),
        ] {
            if !path.starts_with('/') {
                return Err(config_field_error(
                    field,
                    format!("{} must start with '/', got '{}'", field, path),
                ));
            }
        }
        if self.message_model.is_empty() || self.container_model.is_empty() {
            return Err(config_error("model names must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(config_field_error("timeout_secs", "timeout_secs must be positive"));
        }
        Ok(())
    }

    /// Install the global log subscriber for the configured profile
    ///
    /// Only the first call in a process has an effect.
    pub fn init_logging(&self) {
        logging_facility::init(self.log_profile);
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn domain_builder(&self) -> DomainBuilder {
        DomainBuilder::new(self.message_model.clone(), self.container_model.clone())
    }
}
