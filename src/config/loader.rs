use super::types::{AppConfig, StoreBackend};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

/// Values given on the command line; they win over every other source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_addr: Option<String>,
    pub log_level: Option<String>,
    pub store_backend: Option<StoreBackend>,
}

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    search_paths: Vec<String>,
    load_env: bool,
    load_legacy_env: bool,
    overrides: ConfigOverrides,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            config_file: None,
            search_paths: vec![
                "employee-search".to_string(),
                "config/employee-search".to_string(),
            ],
            load_env: false,
            load_legacy_env: false,
            overrides: ConfigOverrides::default(),
        }
    }

    /// Load configuration from file; a given path must exist
    pub fn load_from_file(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.config_file = path.map(Into::into);
        self
    }

    /// Load configuration from `EMPLOYEE_SEARCH__*` environment variables
    pub fn load_from_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Honor `MONGO_URI` and `PORT`
    pub fn load_legacy_env(mut self) -> Self {
        self.load_legacy_env = true;
        self
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Build and validate the final configuration
    pub fn build(self) -> Result<AppConfig> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        if let Some(config_path) = &self.config_file {
            builder = builder.add_source(File::from(config_path.as_path()).required(true));
        } else {
            // Try to load from standard locations
            for path in &self.search_paths {
                builder = builder.add_source(File::with_name(path).required(false));
            }
        }

        if self.load_env {
            builder = builder.add_source(
                Environment::with_prefix("EMPLOYEE_SEARCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("search.blocked_terms"),
            );
        }

        let mut config: AppConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        if self.load_legacy_env {
            config.apply_legacy_env(std::env::var("MONGO_URI").ok(), std::env::var("PORT").ok())?;
        }

        self.apply_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(bind_addr) = &self.overrides.bind_addr {
            config.server.bind_addr = bind_addr.clone();
        }
        if let Some(level) = &self.overrides.log_level {
            config.logging.level = level.clone();
        }
        if let Some(backend) = self.overrides.store_backend {
            config.store.backend = backend;
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
