//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Name of the backing document collection
    pub collection_name: String,
    /// Default TTL in seconds applied when a write supplies no TTL.
    ///
    /// Every record carries an expiration; a record with no expiration is
    /// not representable. Callers wanting "cache forever" must supply an
    /// effectively-infinite TTL themselves.
    pub default_ttl_secs: u64,
    /// Background cleanup sweep interval in seconds
    pub cleanup_interval_secs: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_COLLECTION` - Backing collection name (default: "cache")
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 3600)
    /// - `CACHE_CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            collection_name: env::var("CACHE_COLLECTION")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "cache".to_string()),
            default_ttl_secs: env::var("CACHE_DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            cleanup_interval_secs: env::var("CACHE_CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            collection_name: "cache".to_string(),
            default_ttl_secs: 3600,
            cleanup_interval_secs: 60,
        }
    }
}
