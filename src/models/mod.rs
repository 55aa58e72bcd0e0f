//! Request and Response models for the gateway API
//!
//! Query parameters, JSON bodies and response types of the HTTP surface.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{FetchParams, StoreRequest, TtlField};
pub use responses::{CachedValue, ErrorResponse, StoreResponse, HEALTH_OK, X_CACHE_TTL};
