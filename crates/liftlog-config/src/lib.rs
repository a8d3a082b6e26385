//! # liftlog-config
//!
//! Layered configuration loading for liftlog using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LIFTLOG_*` prefix, `__` as separator)
//! 2. Project-level `.liftlog/config.toml`
//! 3. User-level `~/.config/liftlog/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LIFTLOG_REMOTE__BASE_URL` -> `remote.base_url`,
//! `LIFTLOG_SYNC__UPLOAD_TIMEOUT_MS` -> `sync.upload_timeout_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use liftlog_config::LiftConfig;
//!
//! let config = LiftConfig::load_with_dotenv().expect("config");
//!
//! if config.remote.is_configured() {
//!     println!("Remote: {}", config.remote.base_url);
//! }
//! ```

mod error;
mod general;
mod remote;
mod store;
mod sync;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use remote::RemoteConfig;
pub use store::StoreConfig;
pub use sync::SyncConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "LIFTLOG_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LiftConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl LiftConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load with an explicit project config file on top of the usual chain.
    ///
    /// Environment variables still win over the explicit file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let figment = Self::base_figment()
            .merge(Toml::file(path.into()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(&figment)
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.sync.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Self::base_figment();

        let local_path = PathBuf::from(".liftlog/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Defaults plus the user-global config file.
    fn base_figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }
        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("liftlog").join("config.toml"))
    }

    /// Fail unless the remote section can drive uploads.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when `remote.base_url` is empty.
    pub fn require_remote(&self) -> Result<&RemoteConfig, ConfigError> {
        if self.remote.is_configured() {
            Ok(&self.remote)
        } else {
            Err(ConfigError::NotConfigured {
                section: "remote".into(),
            })
        }
    }
}
