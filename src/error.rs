//! Error types for the cache gateway
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Gateway Error Enum ==
/// Errors surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Required input missing or malformed
    #[error("{0}")]
    InvalidRequest(String),

    /// Key absent or already expired in the store
    #[error("key not found: {0}")]
    NotFound(String),

    /// The key-value store is unreachable or answered with an error
    #[error("backend fault: {0}")]
    Backend(String),
}

impl From<redis::RedisError> for GatewayError {
    fn from(err: redis::RedisError) -> Self {
        GatewayError::Backend(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            GatewayError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "key not found".to_string()),
            GatewayError::Backend(detail) => {
                // Store details stay in the logs
                error!("Key-value store error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Config Error Enum ==
/// Failures while loading or validating startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// An environment override could not be parsed
    #[error("{var} must be {expected}, got '{value}'")]
    InvalidValue {
        var: String,
        value: String,
        expected: &'static str,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// == Result Type Alias ==
/// Convenience Result type for the gateway.
pub type Result<T> = std::result::Result<T, GatewayError>;
