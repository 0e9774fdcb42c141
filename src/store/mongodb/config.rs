//! MongoDB Configuration

use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// MongoDB Connection Configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Collection holding employee documents
    pub collection: String,
    /// Connection pool options
    pub pool_options: MongoConnectionOptions,
}

impl MongoConfig {
    /// Create new MongoDB configuration
    pub fn new(uri: String, database: String, collection: String) -> Self {
        Self {
            uri,
            database,
            collection,
            pool_options: MongoConnectionOptions::default(),
        }
    }

    /// Validate MongoDB configuration
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.uri.is_empty() {
            return Err(StoreError::ConfigurationError(
                "MongoDB URI cannot be empty".to_string(),
            ));
        }
        if self.database.is_empty() {
            return Err(StoreError::ConfigurationError(
                "Database name cannot be empty".to_string(),
            ));
        }
        if self.collection.is_empty() {
            return Err(StoreError::ConfigurationError(
                "Collection name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// MongoDB Connection Pool Options
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MongoConnectionOptions {
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Server selection timeout
    pub server_selection_timeout: Duration,
    /// Application name
    pub app_name: Option<String>,
}

impl Default for MongoConnectionOptions {
    fn default() -> Self {
        Self {
            max_pool_size: 20,
            min_pool_size: 1,
            connect_timeout: Duration::from_secs(10),
            server_selection_timeout: Duration::from_secs(30),
            app_name: Some("employee-search".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let config = MongoConfig::new(
            "mongodb://localhost:27017".to_string(),
            "Employee".to_string(),
            "employees".to_string(),
        );
        assert!(config.validate().is_ok());

        let config = MongoConfig::new(String::new(), "Employee".to_string(), "employees".to_string());
        assert!(matches!(
            config.validate(),
            Err(StoreError::ConfigurationError(_))
        ));
    }
}
