//! Configuration Module
//!
//! Loads gateway configuration once at startup from a JSON file and
//! environment variable overrides.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::store::MAX_TTL_SECONDS;

/// Config file read when `CONFIG_PATH` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Which key-value store the gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// External Redis server
    Redis,
    /// In-process TTL map, for local development
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "redis" => Some(Self::Redis),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Gateway configuration parameters.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Redis server hostname
    pub redis_host: String,
    /// Redis server port
    pub redis_port: u16,
    /// Optional Redis AUTH password
    pub redis_password: Option<String>,
    /// Connect to Redis over TLS (required by managed Redis offerings)
    pub redis_tls: bool,
    /// Default TTL in seconds applied on every store
    pub ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Store backend selection
    pub backend: StoreBackend,
    /// Sweep interval in seconds for the in-process backend
    pub cleanup_interval: u64,
}

impl Config {
    /// Loads configuration from the file named by `CONFIG_PATH` (or
    /// `config.json`), applies environment overrides and validates the result.
    ///
    /// # Environment Variables
    /// - `CONFIG_PATH` - JSON config file; must exist when set explicitly
    /// - `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD` - store address
    /// - `REDIS_TLS` - `true`/`false` (also `1`/`0`, `yes`/`no`)
    /// - `CACHE_TTL` - default TTL in seconds
    /// - `SERVER_PORT` - HTTP port, overridden by `FUNCTIONS_CUSTOMHANDLER_PORT`
    /// - `CACHE_BACKEND` - `redis` or `memory`
    /// - `CLEANUP_INTERVAL` - sweep interval in seconds
    pub fn load() -> Result<Self, ConfigError> {
        let base = match env::var("CONFIG_PATH") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            Err(_) => Self::default(),
        };

        let config = base.with_overrides(|name| env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Applies overrides from a variable lookup, normally the process
    /// environment.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("REDIS_HOST") {
            self.redis_host = host;
        }
        if let Some(port) = parse_var(&lookup, "REDIS_PORT", "a port number")? {
            self.redis_port = port;
        }
        if let Some(password) = lookup("REDIS_PASSWORD") {
            self.redis_password = Some(password).filter(|p| !p.is_empty());
        }
        if let Some(raw) = lookup("REDIS_TLS") {
            self.redis_tls = parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                var: "REDIS_TLS".to_string(),
                value: raw,
                expected: "a boolean",
            })?;
        }
        if let Some(ttl) = parse_var(&lookup, "CACHE_TTL", "an integer")? {
            self.ttl = ttl;
        }
        if let Some(port) = parse_var(&lookup, "SERVER_PORT", "a port number")? {
            self.server_port = port;
        }
        if let Some(port) = parse_var(&lookup, "FUNCTIONS_CUSTOMHANDLER_PORT", "a port number")? {
            self.server_port = port;
        }
        if let Some(raw) = lookup("CACHE_BACKEND") {
            self.backend = StoreBackend::parse(&raw).ok_or(ConfigError::InvalidValue {
                var: "CACHE_BACKEND".to_string(),
                value: raw,
                expected: "'redis' or 'memory'",
            })?;
        }
        if let Some(interval) = parse_var(&lookup, "CLEANUP_INTERVAL", "an integer")? {
            self.cleanup_interval = interval;
        }
        Ok(self)
    }

    /// Rejects values the gateway cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.redis_host.trim().is_empty() {
            return Err(ConfigError::Invalid("redis_host must not be empty".into()));
        }
        if self.redis_port == 0 {
            return Err(ConfigError::Invalid("redis_port must not be 0".into()));
        }
        if self.ttl == 0 {
            return Err(ConfigError::Invalid("ttl must be at least 1 second".into()));
        }
        if self.ttl > MAX_TTL_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "ttl must not exceed {} seconds",
                MAX_TTL_SECONDS
            )));
        }
        if self.server_port == 0 {
            return Err(ConfigError::Invalid("server_port must not be 0".into()));
        }
        if self.cleanup_interval == 0 {
            return Err(ConfigError::Invalid(
                "cleanup_interval must be at least 1 second".into(),
            ));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                var: name.to_string(),
                value: raw,
                expected,
            }),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_host: "localhost".to_string(),
            redis_port: 6379,
            redis_password: None,
            redis_tls: false,
            ttl: 300,
            server_port: 8080,
            backend: StoreBackend::Redis,
            cleanup_interval: 1,
        }
    }
}
