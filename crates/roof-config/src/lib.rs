//! # roof-config
//!
//! Layered configuration loading for Rooftop Intel using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ROOF_*` prefix, `__` as separator)
//! 2. Project-level `.rooftop/config.toml`
//! 3. User-level `~/.config/rooftop/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ROOF_FIREBASE__API_KEY` -> `firebase.api_key`,
//! `ROOF_DEPLOYMENT__NAMESPACE` -> `deployment.namespace`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use roof_config::RoofConfig;
//!
//! let config = RoofConfig::load().expect("config");
//! config.validate().expect("firebase and namespace must be set");
//! ```

mod deployment;
mod error;
mod firebase;
mod general;

pub use deployment::DeploymentConfig;
pub use error::ConfigError;
pub use firebase::FirebaseConfig;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_PREFIX: &str = "ROOF_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RoofConfig {
    #[serde(default)]
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub deployment: DeploymentConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RoofConfig {
    /// Load configuration from TOML files and environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        Self::file_figment().merge(Self::env_provider())
    }

    /// Fail fast when the connection parameters or namespace are missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for a missing section and
    /// `ConfigError::InvalidValue` for a malformed namespace or endpoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.firebase.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "firebase".into(),
            });
        }
        if !self.deployment.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "deployment".into(),
            });
        }
        if let Err(error) = self.deployment.assessments_collection() {
            return Err(ConfigError::InvalidValue {
                field: "deployment.namespace".into(),
                reason: error.to_string(),
            });
        }
        for (field, url) in self.firebase.endpoints() {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: format!("'{url}' is not an http(s) URL"),
                });
            }
        }
        if self.general.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.request_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    fn file_figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".rooftop/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn env_provider() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rooftop").join("config.toml"))
    }
}
