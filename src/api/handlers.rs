//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use tracing::info;

use crate::error::{GatewayError, Result};
use crate::models::{CachedValue, FetchParams, StoreRequest, StoreResponse, HEALTH_OK};
use crate::store::KeyValueStore;

/// Application state shared across all handlers.
///
/// Holds the store handle created once at startup and the default TTL
/// applied to writes. Nothing here is mutated after construction.
#[derive(Clone)]
pub struct AppState {
    /// Shared key-value store
    pub store: Arc<dyn KeyValueStore>,
    /// Default TTL in seconds for stores without an explicit `ttl`
    pub default_ttl: u64,
}

impl AppState {
    /// Creates a new AppState around an already connected store.
    pub fn new(store: Arc<dyn KeyValueStore>, default_ttl: u64) -> Self {
        Self { store, default_ttl }
    }
}

/// Handler for GET /api/cache?key=...
///
/// Returns the stored value with its remaining TTL in `X-CACHE-TTL`.
/// Reading does not refresh the TTL.
pub async fn fetch_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<FetchParams>, QueryRejection>,
) -> Result<CachedValue> {
    let Query(params) = params.map_err(|rejection| {
        GatewayError::InvalidRequest(format!("invalid query string: {}", rejection.body_text()))
    })?;
    let key = params.require_key()?;

    info!("request - GET /api/cache - key: {}", key);

    match state.store.fetch(&key).await? {
        Some(found) => {
            info!("key: {} - X-CACHE-TTL: {:?}", key, found.ttl);
            Ok(CachedValue(found))
        }
        None => Err(GatewayError::NotFound(key)),
    }
}

/// Handler for POST /api/cache
///
/// Overwrites the entry for `key` and resets its TTL.
pub async fn store_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<StoreRequest>, JsonRejection>,
) -> Result<Json<StoreResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        GatewayError::InvalidRequest(format!("invalid request body: {}", rejection.body_text()))
    })?;

    if let Some(error_msg) = req.validate() {
        return Err(GatewayError::InvalidRequest(error_msg));
    }
    let ttl = req.effective_ttl(state.default_ttl)?;

    info!("request - POST /api/cache - key: {}", req.key);

    state.store.store(&req.key, &req.value, ttl).await?;

    info!("cached - key: {} - ttl: {}s", req.key, ttl);
    Ok(Json(StoreResponse::cached()))
}

/// Handler for GET /health and GET /api/health
///
/// Process liveness only. The store is not probed, so this reports OK even
/// while the backend is down.
pub async fn health_handler() -> &'static str {
    HEALTH_OK
}
