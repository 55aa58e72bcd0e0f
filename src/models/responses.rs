//! Response types for the gateway API
//!
//! Defines the outgoing bodies and headers of each endpoint.

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::store::StoredValue;

/// Remaining lifetime of a fetched entry, in seconds.
pub static X_CACHE_TTL: HeaderName = HeaderName::from_static("x-cache-ttl");

/// Body of the health endpoints.
pub const HEALTH_OK: &str = "OK";

/// Successful `GET /api/cache` response.
///
/// The body is the stored value verbatim. `X-CACHE-TTL` carries the
/// remaining seconds (`-1` for a key without expiry) and, for expiring keys,
/// `Cache-Control` lets downstream caches hold the response as long.
#[derive(Debug, Clone)]
pub struct CachedValue(pub StoredValue);

impl IntoResponse for CachedValue {
    fn into_response(self) -> Response {
        let StoredValue { value, ttl } = self.0;
        let mut response = (StatusCode::OK, value).into_response();
        let headers = response.headers_mut();

        match ttl {
            Some(seconds) => {
                headers.insert(X_CACHE_TTL.clone(), HeaderValue::from(seconds));
                if let Ok(cache_control) =
                    HeaderValue::from_str(&format!("public, max-age={}", seconds))
                {
                    headers.insert(header::CACHE_CONTROL, cache_control);
                }
            }
            None => {
                headers.insert(X_CACHE_TTL.clone(), HeaderValue::from(-1i64));
            }
        }

        response
    }
}

/// Response body for `POST /api/cache`.
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    pub message: String,
}

impl StoreResponse {
    pub fn cached() -> Self {
        Self {
            message: "cached".to_string(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
