//! MongoDB employee store
//!
//! Translates filter predicates into MongoDB query documents and reads
//! employees from a single collection.

pub mod config;
pub mod connection;
pub mod document;
pub mod filter;

pub use config::{MongoConfig, MongoConnectionOptions};
pub use connection::MongoEmployeeStore;
pub use document::StoredEmployee;
pub use filter::to_filter_document;

use super::StoreError;

/// MongoDB specific error conversion
pub(crate) fn convert_mongodb_error(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        mongodb::error::ErrorKind::Authentication { .. } => {
            StoreError::ConnectionFailed(format!("Authentication failed: {}", err))
        }
        mongodb::error::ErrorKind::ConnectionPoolCleared { .. } => {
            StoreError::ConnectionFailed(format!("Connection pool cleared: {}", err))
        }
        mongodb::error::ErrorKind::ServerSelection { .. } => {
            StoreError::ConnectionFailed(format!("Server selection failed: {}", err))
        }
        mongodb::error::ErrorKind::InvalidArgument { .. } => {
            StoreError::InvalidQuery(format!("Invalid argument: {}", err))
        }
        mongodb::error::ErrorKind::BsonDeserialization(_) => {
            StoreError::SerializationError(err.to_string())
        }
        _ => StoreError::QueryFailed(err.to_string()),
    }
}
