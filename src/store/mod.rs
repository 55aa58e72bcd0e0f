//! Store Module
//!
//! The seam between the HTTP layer and the key-value store holding cached
//! responses. Expiration is owned by the store; the gateway keeps no state.

mod entry;
mod memory;
mod redis_store;

#[cfg(test)]
mod property_tests;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

// == Public Constants ==
/// Longest TTL a write may ask for (one year).
pub const MAX_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

// == Stored Value ==
/// A live value together with its remaining lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    /// The cached payload
    pub value: String,
    /// Seconds until expiry, `None` when the key never expires
    pub ttl: Option<u64>,
}

// == Key-Value Store Trait ==
/// Operations the gateway needs from a key-value store.
///
/// Implementations must be safe to share across concurrent handlers.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Looks up a key. Absent and expired keys both yield `Ok(None)`.
    async fn fetch(&self, key: &str) -> Result<Option<StoredValue>>;

    /// Overwrites `key` with `value` and sets its expiry in one step.
    async fn store(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()>;

    /// Round-trips to the store to prove it is reachable.
    async fn ping(&self) -> Result<()>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}
