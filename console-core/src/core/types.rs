use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Stored value in the cache store with expiry metadata
#[derive(Debug, Clone)]
pub struct StoredValue {
    /// Cached string payload
    pub data: String,
    /// Optional expiration time
    pub expires_at: Option<Instant>,
    /// When the value was written
    pub created_at: Instant,
}

impl StoredValue {
    /// Create a new stored value
    pub fn new(data: String, ttl_secs: Option<u64>) -> Self {
        let now = Instant::now();
        Self {
            data,
            expires_at: ttl_secs.map(|secs| now + std::time::Duration::from_secs(secs)),
            created_at: now,
        }
    }

    /// Check if the value has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires| Instant::now() >= expires)
    }

    /// Get remaining TTL in seconds
    pub fn remaining_ttl_secs(&self) -> Option<u64> {
        self.expires_at.map(|expires| {
            let now = Instant::now();
            if now >= expires {
                0
            } else {
                (expires - now).as_secs()
            }
        })
    }
}

/// Configuration for the cache store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// TTL applied when a caller sets a key without one (None = no expiry)
    pub default_ttl_secs: Option<u64>,
    /// Expired-key sweep interval in milliseconds
    pub ttl_cleanup_interval_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            // Dictionary payloads are long-lived; one hour matches the
            // console's cache defaults
            default_ttl_secs: Some(3600),
            ttl_cleanup_interval_ms: 1000,
        }
    }
}

/// Statistics for the cache store
#[derive(Debug, Default, Clone, Serialize)]
pub struct StoreStats {
    /// Total number of keys
    pub total_keys: usize,
    /// Number of GET operations
    pub gets: u64,
    /// Number of SET operations
    pub sets: u64,
    /// Number of DELETE operations
    pub dels: u64,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
}

impl StoreStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
