//! # rig-config
//!
//! Layered configuration loading for rig using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RIG_*` prefix, `__` as separator)
//! 2. An explicit config file passed with `--config`
//! 3. Project-level `./rig.toml`
//! 4. User-level `~/.config/rig/config.toml`
//! 5. Built-in defaults
//!
//! `RIG_AUTH__SECRET_KEY` maps to `auth.secret_key`,
//! `RIG_STORAGE__REPOS_BASE_PATH` to `storage.repos_base_path`, and so on.
//!
//! The loaded [`RigConfig`] is built once at startup and handed to each
//! component; nothing reads settings from global state.

mod auth;
mod catalog;
mod database;
mod error;
mod server;
mod storage;

pub use auth::{AuthConfig, DEFAULT_SECRET_KEY};
pub use catalog::CatalogConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use server::ServerConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-level config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "rig.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RigConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl RigConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; see [`Self::load_with_dotenv`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering `explicit` above the project file when given.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory, then load configuration.
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load_from(explicit)
    }

    /// Build the default provider chain.
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    /// Build the provider chain with an optional explicit file layer.
    pub fn figment_with(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("RIG_").split("__"))
    }

    /// Reject values the rest of the system cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.algorithm != "HS256" {
            return Err(ConfigError::invalid(
                "auth.algorithm",
                format!("unsupported algorithm '{}' (only HS256)", self.auth.algorithm),
            ));
        }
        if self.auth.secret_key.is_empty() {
            return Err(ConfigError::invalid("auth.secret_key", "must not be empty"));
        }
        if self.auth.access_token_expire_minutes <= 0 {
            return Err(ConfigError::invalid(
                "auth.access_token_expire_minutes",
                "must be positive",
            ));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::invalid(
                "auth.bcrypt_cost",
                "must be between 4 and 31",
            ));
        }
        rig_core::validate::path_segment("storage.suite_dir_name", &self.storage.suite_dir_name)
            .map_err(|e| ConfigError::invalid("storage.suite_dir_name", e.to_string()))?;
        if let Some(current) = &self.storage.current_repo {
            rig_core::validate::path_segment("storage.current_repo", current)
                .map_err(|e| ConfigError::invalid("storage.current_repo", e.to_string()))?;
        }
        let ext = &self.catalog.tracked_extension;
        if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(ConfigError::invalid(
                "catalog.tracked_extension",
                "must be a bare extension such as 'py'",
            ));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rig").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RigConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.storage.suite_dir_name, "suites");
        assert_eq!(config.catalog.tracked_extension, "py");
        assert!(!config.catalog.stamp_after_scan);
    }

    #[test]
    fn rejects_other_algorithms() {
        let mut config = RigConfig::default();
        config.auth.algorithm = "RS256".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "auth.algorithm"));
    }

    #[test]
    fn rejects_dotted_suite_dir() {
        let mut config = RigConfig::default();
        config.storage.suite_dir_name = ".suites".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_dotted_extension() {
        let mut config = RigConfig::default();
        config.catalog.tracked_extension = ".py".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn mirror_path_joins_name() {
        let config = RigConfig::default();
        assert_eq!(
            config.storage.mirror_path("lab"),
            PathBuf::from("./data/repos/lab")
        );
    }
}
