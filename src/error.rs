//! Error types for the employee search service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::store::StoreError;

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the compiler, the store and the HTTP layer
#[derive(Debug, Error)]
pub enum Error {
    /// Missing, blank or untokenizable query text
    #[error("Validation error: {0}")]
    Validation(String),

    /// Query contains a blocked term
    #[error("Rejected query: {0}")]
    RejectedQuery(String),

    /// Well-formed predicate that matched zero records
    #[error("No matching employees found")]
    NoMatch,

    /// Record store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Broken internal invariant
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status code for this error kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::RejectedQuery(_) => StatusCode::BAD_REQUEST,
            Error::NoMatch => StatusCode::NOT_FOUND,
            Error::Store(_) | Error::Config(_) | Error::Internal(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to return to API clients
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(message) => message.clone(),
            Error::RejectedQuery(_) => "Search query contains a blocked term".to_string(),
            Error::NoMatch => self.to_string(),
            Error::Store(_) => "Error fetching employees".to_string(),
            Error::Config(_) | Error::Internal(_) | Error::Io(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({
            "error": self.public_message(),
        });

        (status, Json(body)).into_response()
    }
}
