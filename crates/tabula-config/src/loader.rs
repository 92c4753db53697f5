//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use tabula_core::TabulaError;
use tracing::{debug, info};

/// Configuration loader with reload support.
///
/// Sources are applied in order, later ones overriding earlier ones:
/// 1. `{config_dir}/default.toml`
/// 2. `{config_dir}/{environment}.toml` (from `TABULA_ENVIRONMENT`)
/// 3. `{config_dir}/local.toml` (not committed to version control)
/// 4. Environment variables with the `TABULA_` prefix, `__` separating
///    nesting levels (e.g. `TABULA_DATABASE__URL`)
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a loader and performs the initial load.
    pub fn new(config_dir: impl Into<String>) -> Result<Self, TabulaError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, TabulaError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn get(&self) -> AppConfig {
        self.config.read().clone()
    }

    /// Reloads the configuration from disk.
    pub fn reload(&self) -> Result<(), TabulaError> {
        let new_config = Self::load_config(&self.config_dir)?;
        *self.config.write() = new_config;
        info!("configuration reloaded");
        Ok(())
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, TabulaError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("no .env file loaded: {}", e);
        }

        let environment =
            std::env::var("TABULA_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        info!("loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("loading config file: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("TABULA")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error)?;
        let app_config: AppConfig = config.try_deserialize().map_err(config_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    fn validate_config(config: &AppConfig) -> Result<(), TabulaError> {
        if config.database.url.is_empty() {
            return Err(TabulaError::configuration("database URL is required"));
        }

        if config.database.max_connections == 0 {
            return Err(TabulaError::configuration(
                "database max_connections must be at least 1",
            ));
        }

        if config.database.min_connections > config.database.max_connections {
            return Err(TabulaError::configuration(
                "database min_connections exceeds max_connections",
            ));
        }

        Ok(())
    }
}

fn config_error(err: ConfigError) -> TabulaError {
    TabulaError::Configuration(err.to_string())
}
