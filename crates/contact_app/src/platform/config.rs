//! RON configuration for the contact shell.
//!
//! Every section is optional; omitted values fall back to defaults so a
//! config file only needs the EmailJS identifiers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use contact_core::{SubmitPolicy, DEFAULT_FALLBACK_EMAIL};
use contact_delivery::{default_endpoint, DeliverySettings};
use serde::Deserialize;
use url::Url;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "./contact.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub delivery: DeliveryConfig,
    pub contact: ContactConfig,
    pub log: LogDestination,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Rejected at load time when it is not an absolute URL.
    pub endpoint: Url,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub access_token: Option<String>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            access_token: None,
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
        }
    }
}

impl DeliveryConfig {
    pub fn to_settings(&self) -> DeliverySettings {
        DeliverySettings {
            endpoint: self.endpoint.clone(),
            service_id: self.service_id.clone(),
            template_id: self.template_id.clone(),
            public_key: self.public_key.clone(),
            access_token: self.access_token.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum SubmitPolicyConfig {
    #[default]
    Permissive,
    RequireValid,
}

impl From<SubmitPolicyConfig> for SubmitPolicy {
    fn from(value: SubmitPolicyConfig) -> Self {
        match value {
            SubmitPolicyConfig::Permissive => SubmitPolicy::Permissive,
            SubmitPolicyConfig::RequireValid => SubmitPolicy::RequireValid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Address offered when a send fails.
    pub fallback_email: String,
    pub submit_policy: SubmitPolicyConfig,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            fallback_email: DEFAULT_FALLBACK_EMAIL.to_string(),
            submit_policy: SubmitPolicyConfig::default(),
        }
    }
}

/// Where the loaded settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Nothing was named and the default file does not exist.
    Defaults { looked_at: PathBuf },
}

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: ConfigSource,
}

/// Loads the config named on the command line, or `./contact.ron` when none
/// was named. Only the implicit default file may be absent.
pub(crate) fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if explicit.is_none() && err.kind() == io::ErrorKind::NotFound => {
            return Ok(LoadedConfig {
                config: AppConfig::default(),
                source: ConfigSource::Defaults {
                    looked_at: path.to_path_buf(),
                },
            });
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(LoadedConfig {
        config,
        source: ConfigSource::File(path.to_path_buf()),
    })
}
