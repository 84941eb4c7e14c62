//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use emporium_core::EmporiumError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable prefix; nested keys use `__`, e.g. `EMPORIUM__CACHE__BACKEND`.
pub const ENV_PREFIX: &str = "EMPORIUM";

/// Loads [`AppConfig`] from a configuration directory.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: String,
}

impl ConfigLoader {
    /// Creates a loader for `config_dir`.
    ///
    /// The environment name comes from `EMPORIUM_ENVIRONMENT` and defaults
    /// to `development`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        let environment =
            std::env::var("EMPORIUM_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        Self {
            config_dir: config_dir.into(),
            environment,
        }
    }

    /// Loader for the default location (`./config`).
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Overrides the environment name.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Loads and validates the configuration.
    ///
    /// Sources, later overriding earlier:
    /// 1. `default.toml`
    /// 2. `{environment}.toml`
    /// 3. `local.toml` (not committed to version control)
    /// 4. `EMPORIUM__*` environment variables
    pub fn load(&self) -> Result<AppConfig, EmporiumError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        info!("Loading configuration for environment: {}", self.environment);

        let mut builder = Config::builder();
        for name in ["default", self.environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{}.toml", name));
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_emporium_error)?;
        app_config.app.environment.clone_from(&self.environment);

        if app_config.app.environment == "production"
            && app_config.security.jwt_secret.starts_with("change-me")
        {
            warn!("Using default JWT secret in production! This is a security risk.");
        }

        ConfigValidator::validate(&app_config)
            .map_err(|errors| EmporiumError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

fn config_error_to_emporium_error(err: ConfigError) -> EmporiumError {
    EmporiumError::Configuration(err.to_string())
}
