//! Configuration manager implementation

use std::{collections::HashMap, path::PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{ConfigOverrides, ServerConfig},
};

/// Picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "stringlab.toml";

/// Environment prefix for `STRINGLAB_HOST`, `STRINGLAB_PORT`, ...
pub const ENV_PREFIX: &str = "STRINGLAB";

/// Configuration manager
pub struct ConfigManager {
    /// Explicit configuration file; must exist when set
    config_path: Option<PathBuf>,
    /// Environment prefix
    env_prefix: String,
    /// Environment snapshot; `None` reads the process environment
    env: Option<HashMap<String, String>>,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: ENV_PREFIX.to_string(),
            env: None,
        }
    }

    /// Create with a required config file
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: Some(path),
            ..Self::new()
        }
    }

    /// Read variables from `vars` instead of the process environment
    pub fn with_env(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Load and validate the configuration.
    ///
    /// Precedence, lowest first: defaults, config file, `STRINGLAB_*`,
    /// bare `PORT`, `overrides`.
    pub fn load_config(&self, overrides: &ConfigOverrides) -> Result<ServerConfig> {
        let file = match &self.config_path {
            Some(path) => File::from(path.clone()).format(FileFormat::Toml).required(true),
            None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE))
                .format(FileFormat::Toml)
                .required(false),
        };

        let mut builder = Config::builder().add_source(file).add_source(
            Environment::with_prefix(&self.env_prefix)
                .try_parsing(true)
                .source(self.env.clone()),
        );

        if let Some(port) = self.env_var("PORT") {
            builder = builder.set_override("port", port)?;
        }
        if let Some(host) = &overrides.host {
            builder = builder.set_override("host", host.clone())?;
        }
        if let Some(port) = overrides.port {
            builder = builder.set_override("port", i64::from(port))?;
        }
        if let Some(level) = &overrides.log_level {
            builder = builder.set_override("log_level", level.clone())?;
        }

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        self.validate_config(&config)?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn validate_config(&self, config: &ServerConfig) -> Result<()> {
        if config.host.trim().is_empty() {
            return Err(ConfigError::Validation("Host cannot be empty".to_string()));
        }
        config.log_level()?;
        Ok(())
    }

    fn env_var(&self, key: &str) -> Option<String> {
        match &self.env {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
