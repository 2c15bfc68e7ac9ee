use super::types::{StoreConfig, StoreStats, StoredValue};
use parking_lot::RwLock;
use radix_trie::{Trie, TrieCommon};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Key-value cache store with per-key TTL, backed by a radix trie so that
/// prefix enumeration stays cheap.
///
/// Values are strings; callers serialize richer payloads themselves. There
/// is intentionally no atomic increment: the lockout counter on top of this
/// store uses a plain get-then-set sequence.
#[derive(Clone)]
pub struct CacheStore {
    data: Arc<RwLock<Trie<String, StoredValue>>>,
    stats: Arc<RwLock<StoreStats>>,
    config: StoreConfig,
}

impl CacheStore {
    /// Create a new cache store with the given configuration
    pub fn new(config: StoreConfig) -> Self {
        info!(
            "Initializing cache store with default_ttl={:?}s, cleanup_interval={}ms",
            config.default_ttl_secs, config.ttl_cleanup_interval_ms
        );

        Self {
            data: Arc::new(RwLock::new(Trie::new())),
            stats: Arc::new(RwLock::new(StoreStats::default())),
            config,
        }
    }

    /// Start background TTL cleanup task
    pub fn start_ttl_cleanup(&self) -> tokio::task::JoinHandle<()> {
        let interval_ms = self.config.ttl_cleanup_interval_ms;
        info!("Starting TTL cleanup task (interval={}ms)", interval_ms);

        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));

            loop {
                interval.tick().await;
                store.cleanup_expired().await;
            }
        })
    }

    /// Set a key-value pair. `ttl_secs = None` falls back to the store's
    /// configured default TTL.
    pub async fn set(&self, key: &str, value: impl Into<String>, ttl_secs: Option<u64>) {
        let value = value.into();
        debug!("SET key={}, size={}, ttl={:?}", key, value.len(), ttl_secs);

        let ttl = ttl_secs.or(self.config.default_ttl_secs);
        let stored = StoredValue::new(value, ttl);

        let mut data = self.data.write();
        let is_new = data.insert(key.to_string(), stored).is_none();

        let mut stats = self.stats.write();
        stats.sets += 1;
        if is_new {
            stats.total_keys += 1;
        }
    }

    /// Get a value by key. Expired entries are dropped on read.
    pub async fn get(&self, key: &str) -> Option<String> {
        debug!("GET key={}", key);

        let mut data = self.data.write();
        let mut stats = self.stats.write();
        stats.gets += 1;

        if let Some(value) = data.get(key) {
            if value.is_expired() {
                debug!("Key expired: {}", key);
                data.remove(key);
                stats.misses += 1;
                stats.total_keys = stats.total_keys.saturating_sub(1);
                return None;
            }

            stats.hits += 1;
            Some(value.data.clone())
        } else {
            stats.misses += 1;
            None
        }
    }

    /// Delete a key, returning whether it was present
    pub async fn delete(&self, key: &str) -> bool {
        debug!("DELETE key={}", key);

        let mut data = self.data.write();
        let removed = data.remove(key);

        if removed.is_some() {
            let mut stats = self.stats.write();
            stats.dels += 1;
            stats.total_keys = stats.total_keys.saturating_sub(1);
            true
        } else {
            false
        }
    }

    /// Check if a key exists and has not expired
    pub async fn exists(&self, key: &str) -> bool {
        let data = self.data.read();
        data.get(key).is_some_and(|value| !value.is_expired())
    }

    /// Get remaining TTL in seconds for a key. `None` when the key is
    /// absent or carries no expiry.
    pub async fn ttl(&self, key: &str) -> Option<u64> {
        let data = self.data.read();
        data.get(key).and_then(|value| value.remaining_ttl_secs())
    }

    /// Enumerate keys under a prefix
    pub async fn keys(&self, prefix: &str) -> Vec<String> {
        debug!("KEYS prefix={}", prefix);

        let data = self.data.read();
        data.get_raw_descendant(prefix)
            .map(|subtrie| {
                subtrie
                    .iter()
                    .filter(|(_, v)| !v.is_expired())
                    .map(|(k, _)| k.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get statistics
    pub async fn stats(&self) -> StoreStats {
        self.stats.read().clone()
    }

    /// Drop expired keys
    async fn cleanup_expired(&self) {
        let mut data = self.data.write();
        let mut stats = self.stats.write();

        let expired_keys: Vec<String> = data
            .iter()
            .filter(|(_, v)| v.is_expired())
            .map(|(k, _)| k.clone())
            .collect();

        let count = expired_keys.len();
        if count > 0 {
            debug!("Cleaning up {} expired keys", count);
            for key in expired_keys {
                data.remove(&key);
            }
            stats.total_keys = stats.total_keys.saturating_sub(count);
        }
    }
}
