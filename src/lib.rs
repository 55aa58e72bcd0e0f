//! Cache Gateway - an HTTP front for a Redis response cache
//!
//! Translates fetch/store requests onto a key-value store's native
//! GET/SET EX/TTL commands. Expiration is owned by the store.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::{Config, StoreBackend};
pub use error::{ConfigError, GatewayError};
pub use store::{KeyValueStore, MemoryStore, RedisStore, StoredValue};
pub use tasks::spawn_cleanup_task;
