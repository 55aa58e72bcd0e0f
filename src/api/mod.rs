//! API Module
//!
//! HTTP handlers and routing for the gateway.
//!
//! # Endpoints
//! - `GET /api/cache?key=` - Fetch a cached value
//! - `POST /api/cache` - Store a value with TTL
//! - `GET /health` - Liveness probe

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
