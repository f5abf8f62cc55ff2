//! Per-service connection settings.
//!
//! Every adapter is built from one [`ServiceConfig`]: base URL, content type,
//! timeout, and the name of the environment variable holding its credential.
//! Credentials themselves never live in the file.

use crate::error::config::ConfigError;

use common::{ErrorLocation, RedactedApiKey};

use std::collections::HashSet;
use std::panic::Location;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const SERVICES_FILE_NAME: &str = "services.toml";
const MAX_TIMEOUT_SECS: u64 = 300;

static LOAD_DOTENV_ONCE: Once = Once::new();

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    pub name: String,
    pub base_url: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServiceConfig {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            content_type: default_content_type(),
            api_key_env: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_api_key_env(mut self, env_var: impl Into<String>) -> Self {
        self.api_key_env = Some(env_var.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the credential from the environment (a `.env` file is honored).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] if no variable is configured,
    /// or the variable is unset or blank.
    pub fn credential(&self) -> Result<RedactedApiKey, ConfigError> {
        LOAD_DOTENV_ONCE.call_once(|| {
            if let Ok(path) = dotenvy::dotenv() {
                debug!("Loaded environment from {}", path.display());
            }
        });

        let env_var = self.api_key_env.as_deref().unwrap_or_default();

        match std::env::var(env_var) {
            Ok(value) if !env_var.is_empty() && !value.trim().is_empty() => {
                Ok(RedactedApiKey::new(value.trim()))
            }
            _ => Err(ConfigError::MissingCredential {
                location: ErrorLocation::from(Location::caller()),
                service: self.name.clone(),
                env_var: env_var.to_string(),
            }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "Service name cannot be empty".to_string(),
            });
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid base_url for service '{}': {}",
                    self.name, self.base_url
                ),
            });
        }

        if self.content_type.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Service '{}' has an empty content_type", self.name),
            });
        }

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid timeout for service '{}': {} (must be 1-{})",
                    self.name, self.timeout_secs, MAX_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServicesConfig {
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_content_type() -> String {
    "application/json".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ServicesConfig {
    /// Load `{config_dir}/services.toml`.
    ///
    /// # Returns
    ///
    /// Returns defaults (no services) if the file is missing.
    /// Returns `Err(ConfigError)` if the file exists but is unreadable or invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(SERVICES_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Services file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let config = Self::load_from_path(&config_path)?;
        info!(
            "Loaded {} service(s) from {}",
            config.services.len(),
            config_path.display()
        );
        Ok(config)
    }

    /// Load and validate a specific file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            warn!("Failed to read services file {}: {}", path.display(), e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        let config: ServicesConfig = toml::from_str(&contents).map_err(|e| {
            warn!("Failed to parse services file {}: {}", path.display(), e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate every service and reject duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for the first invalid entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();

        for service in &self.services {
            service.validate()?;

            if !seen.insert(service.name.as_str()) {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("Duplicate service '{}'", service.name),
                });
            }
        }

        Ok(())
    }

    /// Look up a service by name.
    #[track_caller]
    pub fn service(&self, name: &str) -> Result<&ServiceConfig, ConfigError> {
        let location = ErrorLocation::from(Location::caller());

        self.services
            .iter()
            .find(|service| service.name == name)
            .ok_or_else(|| ConfigError::UnknownService {
                location,
                service: name.to_string(),
            })
    }
}
