//! In-memory TTL cache, used for the rendered RSS feed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::ports::{Cache, CacheError};

struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

/// In-memory cache using a HashMap behind an async RwLock.
///
/// Entries are per-process and lost on restart.
pub struct InMemoryCache {
    store: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        entry
            .expires_at
            .map(|exp| Instant::now() >= exp)
            .unwrap_or(false)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().await;
        let entry = store.get(key)?;

        if Self::is_expired(entry) {
            drop(store);
            let mut store = self.store.write().await;
            store.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.retain(|_, entry| !Self::is_expired(entry));

        let expires_at = ttl.map(|d| Instant::now() + d);

        store.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();
        cache.set("feed", "<rss/>", None).await.unwrap();
        assert_eq!(cache.get("feed").await, Some("<rss/>".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = InMemoryCache::new();
        cache.set("feed", "<rss/>", None).await.unwrap();
        cache.delete("feed").await.unwrap();
        assert_eq!(cache.get("feed").await, None);
    }

    #[tokio::test]
    async fn test_set_sweeps_expired_entries() {
        let cache = InMemoryCache::new();
        for key in ["a", "b", "c"] {
            cache.set(key, "stale", Some(Duration::ZERO)).await.unwrap();
        }
        cache.set("feed", "<rss/>", None).await.unwrap();

        let store = cache.store.read().await;
        assert_eq!(store.len(), 1);
        assert!(store.contains_key("feed"));
    }

    #[tokio::test]
    async fn test_zero_ttl_expires_immediately() {
        let cache = InMemoryCache::new();
        cache
            .set("feed", "<rss/>", Some(Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(cache.get("feed").await, None);
    }
}
