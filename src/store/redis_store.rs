//! Redis store
//!
//! Production backend. Uses a `ConnectionManager`, a multiplexed connection
//! that reconnects on its own and is cheap to clone per request.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use tracing::debug;

use super::{KeyValueStore, StoredValue};
use crate::config::Config;
use crate::error::Result;

// == Redis Store ==
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    address: String,
}

impl RedisStore {
    /// Opens a managed connection to the server described by `config`.
    pub async fn connect(config: &Config) -> Result<Self> {
        let info = ConnectionInfo {
            addr: connection_addr(config),
            redis: RedisConnectionInfo {
                db: 0,
                password: config.redis_password.clone(),
                ..Default::default()
            },
        };

        let client = Client::open(info)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self {
            conn,
            address: format!("{}:{}", config.redis_host, config.redis_port),
        })
    }

    /// `host:port` of the server, for logs.
    pub fn address(&self) -> &str {
        &self.address
    }
}

fn connection_addr(config: &Config) -> ConnectionAddr {
    if config.redis_tls {
        ConnectionAddr::TcpTls {
            host: config.redis_host.clone(),
            port: config.redis_port,
            insecure: false,
            tls_params: None,
        }
    } else {
        ConnectionAddr::Tcp(config.redis_host.clone(), config.redis_port)
    }
}

/// Maps a Redis `PTTL` reply onto whole seconds remaining, rounded up.
///
/// `-1` means no expiry. `-2` (no such key) cannot arrive alongside a value,
/// so every negative reply reads as "no expiry". Rounding up keeps the
/// reported TTL above zero for as long as the key is served.
fn remaining_ttl(reply_ms: i64) -> Option<u64> {
    u64::try_from(reply_ms).ok().map(|ms| ms.div_ceil(1000))
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn fetch(&self, key: &str) -> Result<Option<StoredValue>> {
        let mut conn = self.conn.clone();

        // GET and PTTL inside one MULTI/EXEC so both describe the same entry
        let (value, ttl_ms): (Option<String>, i64) = redis::pipe()
            .atomic()
            .get(key)
            .pttl(key)
            .query_async(&mut conn)
            .await?;

        match value {
            Some(value) => {
                debug!("Cache hit for key '{}' (pttl reply {}ms)", key, ttl_ms);
                Ok(Some(StoredValue {
                    value,
                    ttl: remaining_ttl(ttl_ms),
                }))
            }
            None => {
                debug!("Cache miss for key '{}'", key);
                Ok(None)
            }
        }
    }

    async fn store(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.conn.clone();

        // SET key value EX ttl
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds).await?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_seconds);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
