use crate::error::{Error, Result};
use crate::logging::LogConfig;
use crate::nlp::{Category, CompilerSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Employee store configuration
    pub store: StoreConfig,

    /// Query compiler configuration
    pub search: SearchConfig,

    /// Logging configuration
    pub logging: LogConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// Permissive CORS for browser clients
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            cors_enabled: true,
        }
    }
}

/// Record store selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongodb,
    Memory,
}

/// Employee store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// MongoDB connection URI
    pub uri: String,

    /// MongoDB database name
    pub database: String,

    /// MongoDB collection name
    pub collection: String,

    /// Insert synthetic employees when the store is empty at startup
    pub seed_when_empty: bool,

    /// Number of synthetic employees to insert
    pub seed_count: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Mongodb,
            uri: "mongodb://localhost:27017".to_string(),
            database: "Employee".to_string(),
            collection: "employees".to_string(),
            seed_when_empty: true,
            seed_count: 50,
        }
    }
}

/// Query compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Tokens searched around salary, age and year anchors
    pub numeral_window: usize,

    /// Terms rejected in addition to the built-in list
    pub blocked_terms: Vec<String>,

    /// Category name (state, department, skill, education) to extra terms
    pub extra_terms: HashMap<String, Vec<String>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            numeral_window: crate::nlp::numeric::DEFAULT_NUMERAL_WINDOW,
            blocked_terms: Vec::new(),
            extra_terms: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Checks values the deserializer cannot
    pub fn validate(&self) -> Result<()> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(Error::Config("server.bind_addr cannot be empty".to_string()));
        }
        self.bind_socket_addr()?;

        if self.search.numeral_window == 0 {
            return Err(Error::Config(
                "search.numeral_window must be at least 1".to_string(),
            ));
        }

        if self.store.backend == StoreBackend::Mongodb && self.store.uri.trim().is_empty() {
            return Err(Error::Config(
                "store.uri is required for the mongodb backend".to_string(),
            ));
        }

        self.to_compiler_settings().map(|_| ())
    }

    pub fn bind_socket_addr(&self) -> Result<SocketAddr> {
        self.server.bind_addr.parse().map_err(|e| {
            Error::Config(format!(
                "Invalid server.bind_addr '{}': {}",
                self.server.bind_addr, e
            ))
        })
    }

    /// Compiler settings with category names resolved
    pub fn to_compiler_settings(&self) -> Result<CompilerSettings> {
        let mut extra_terms = HashMap::new();
        for (name, terms) in &self.search.extra_terms {
            let category: Category = name.parse()?;
            extra_terms
                .entry(category)
                .or_insert_with(Vec::new)
                .extend(terms.iter().cloned());
        }

        Ok(CompilerSettings {
            numeral_window: self.search.numeral_window,
            blocked_terms: self.search.blocked_terms.clone(),
            extra_terms,
        })
    }

    #[cfg(feature = "mongodb-backend")]
    pub fn to_mongo_config(&self) -> crate::store::MongoConfig {
        crate::store::MongoConfig::new(
            self.store.uri.clone(),
            self.store.database.clone(),
            self.store.collection.clone(),
        )
    }

    /// Applies the `MONGO_URI` / `PORT` variables of older deployments
    ///
    /// `PORT` replaces only the port of the configured bind address.
    pub fn apply_legacy_env(&mut self, mongo_uri: Option<String>, port: Option<String>) -> Result<()> {
        if let Some(uri) = mongo_uri.filter(|u| !u.trim().is_empty()) {
            self.store.uri = uri;
        }

        if let Some(port) = port {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("Invalid PORT value '{}'", port)))?;
            let host = self
                .server
                .bind_addr
                .rsplit_once(':')
                .map(|(host, _)| host)
                .unwrap_or("0.0.0.0");
            self.server.bind_addr = format!("{}:{}", host, port);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.bind_addr, "0.0.0.0:5000");
        assert_eq!(config.store.database, "Employee");
        assert_eq!(config.store.seed_count, 50);
        assert_eq!(config.search.numeral_window, 4);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AppConfig::default();
        config.server.bind_addr = "  ".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = AppConfig::default();
        config.search.numeral_window = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = AppConfig::default();
        config.store.uri.clear();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        config.store.backend = StoreBackend::Memory;
        assert!(config.validate().is_ok());

        let mut config = AppConfig::default();
        config
            .search
            .extra_terms
            .insert("planet".to_string(), vec!["Mars".to_string()]);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_compiler_settings_resolve_categories() {
        let mut config = AppConfig::default();
        config
            .search
            .extra_terms
            .insert("Skill".to_string(), vec!["Rust".to_string()]);
        config.search.blocked_terms = vec!["bonus".to_string()];

        let settings = config.to_compiler_settings().unwrap();
        assert_eq!(settings.extra_terms[&Category::Skill], vec!["Rust".to_string()]);
        assert_eq!(settings.blocked_terms, vec!["bonus".to_string()]);
    }

    #[test]
    fn test_legacy_env() {
        let mut config = AppConfig::default();
        config
            .apply_legacy_env(
                Some("mongodb://db:27017".to_string()),
                Some("8080".to_string()),
            )
            .unwrap();
        assert_eq!(config.store.uri, "mongodb://db:27017");
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");

        assert!(config.apply_legacy_env(None, Some("http".to_string())).is_err());
    }
}
