//! Employee record stores
//!
//! The compiler only produces [`FilterPredicate`]s; stores translate them into
//! their native query form and return matching [`EmployeeRecord`]s.

pub mod memory;
#[cfg(feature = "mongodb-backend")]
pub mod mongodb;
pub mod seed;

use crate::employee::EmployeeRecord;
use crate::nlp::FilterPredicate;
use async_trait::async_trait;
use thiserror::Error;

pub use memory::InMemoryEmployeeStore;
#[cfg(feature = "mongodb-backend")]
pub use self::mongodb::{MongoConfig, MongoEmployeeStore};
pub use seed::{generate_employees, seed_if_empty};

/// Store-level errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Read/seed access to employee records
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Records satisfying every constraint of `predicate`
    async fn find(&self, predicate: &FilterPredicate) -> Result<Vec<EmployeeRecord>, StoreError>;

    /// Every record
    async fn find_all(&self) -> Result<Vec<EmployeeRecord>, StoreError> {
        self.find(&FilterPredicate::new()).await
    }

    /// Number of stored records
    async fn count(&self) -> Result<u64, StoreError>;

    /// Inserts records, returning how many were written
    async fn insert_many(&self, records: Vec<EmployeeRecord>) -> Result<usize, StoreError>;

    /// Backend name for logs
    fn backend_name(&self) -> &'static str;
}
