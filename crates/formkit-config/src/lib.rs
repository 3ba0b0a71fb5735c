//! # formkit-config
//!
//! Layered configuration loading for formkit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FORMKIT_*` prefix, `__` as separator)
//! 2. Project-level `formkit.toml`
//! 3. User-level `~/.config/formkit/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FORMKIT_SERVER__PORT` -> `server.port`,
//! `FORMKIT_FORM__LIST_ENCODING` -> `form.list_encoding`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use formkit_config::FormkitConfig;
//!
//! let config = FormkitConfig::load_with_dotenv().expect("config");
//! println!("serving {} on {}", config.form.schema_path.display(), config.server.bind_addr());
//! ```

mod error;
mod form;
mod server;

pub use error::ConfigError;
pub use form::FormConfig;
pub use server::ServerConfig;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "formkit.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormkitConfig {
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl FormkitConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if present) before building
    /// the figment.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("FORMKIT_").split("__"))
    }

    /// Reject values that would only fail later, at bind or write time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.workers".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.host".into(),
                reason: "must not be empty".into(),
            });
        }
        for (field, path) in [
            ("form.schema_path", &self.form.schema_path),
            ("form.types_path", &self.form.types_path),
            ("form.output_path", &self.form.output_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: "must not be empty".into(),
                });
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("formkit").join("config.toml"))
    }
}
