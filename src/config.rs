//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_SHARDS;
use crate::upstream::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of postcodes the cache can hold
    pub max_entries: usize,
    /// Seconds a cached lookup stays servable
    pub cache_ttl: u64,
    /// Number of independently locked cache shards
    pub cache_shards: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Discovery API scheme and host
    pub upstream_base_url: String,
    /// Discovery request timeout in seconds
    pub upstream_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cached postcodes (default: 1000)
    /// - `CACHE_TTL` - Cache freshness window in seconds (default: 1800)
    /// - `CACHE_SHARDS` - Cache lock stripes (default: 16)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 60)
    /// - `UPSTREAM_BASE_URL` - Discovery API base URL (default: https://uk.api.just-eat.io)
    /// - `UPSTREAM_TIMEOUT` - Discovery request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            cache_shards: env_or("CACHE_SHARDS", defaults.cache_shards),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout: env_or("UPSTREAM_TIMEOUT", defaults.upstream_timeout),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            cache_ttl: 1800,
            cache_shards: DEFAULT_SHARDS,
            server_port: 8080,
            cleanup_interval: 60,
            upstream_base_url: DEFAULT_BASE_URL.to_string(),
            upstream_timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}
