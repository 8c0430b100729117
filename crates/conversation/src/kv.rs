//! The abstract key-value capability conversation threads are stored
//! behind. `MemoryStore` is a
//! real implementation used in tests and wherever `REDIS_URL` is unset;
//! `RedisStore` is the production backend.

use std::time::Duration;

use async_trait::async_trait;
use mini_moka::sync::Cache;
use redis::AsyncCommands;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conversation thread not found")]
    NotFound,
    #[error("key-value backend error: {0}")]
    Backend(String),
}

/// Get/set/del over opaque string values with a TTL, renewed on every
/// write. The only shared mutable resource in this system;
/// ownership of any given key is logically single-writer per request.
#[async_trait]
pub trait Kv: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError>;
    async fn del(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process TTL map. `time_to_idle` means every `set` (and, generously,
/// every `get`) renews the expiry — exactly the "renewed on every append"
/// rule, without tracking per-key deadlines by hand.
pub struct MemoryStore {
    cache: Cache<String, String>,
}

impl MemoryStore {
    pub fn new(ttl: Duration) -> Self {
        Self { cache: Cache::builder().time_to_idle(ttl).build() }
    }
}

#[async_trait]
impl Kv for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.cache.get(&key.to_string()))
    }

    async fn set(&self, key: &str, value: String, _ttl: Duration) -> Result<(), StoreError> {
        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        self.cache.invalidate(&key.to_string());
        Ok(())
    }
}

/// Redis-backed store for multi-process / durable-within-TTL deployments.
/// [`redis::aio::ConnectionManager`] is itself cheaply `Clone` (it shares a
/// reconnecting multiplexed connection internally), so no pooling wrapper
/// is needed on top of it.
pub struct RedisStore {
    manager: redis::aio::ConnectionManager,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url).map_err(|err| StoreError::Backend(err.to_string()))?;
        let manager = client.get_connection_manager().await.map_err(|err| StoreError::Backend(err.to_string()))?;
        Ok(Self { manager })
    }
}

#[async_trait]
impl Kv for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.manager.clone();
        conn.get(key).await.map_err(|err| StoreError::Backend(err.to_string()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds).await.map_err(|err| StoreError::Backend(err.to_string()))
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();
        conn.del::<_, ()>(key).await.map_err(|err| StoreError::Backend(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryStore::new(Duration::from_secs(3600));
        store.set("thread:1", "payload".to_string(), Duration::from_secs(3600)).await.unwrap();
        assert_eq!(store.get("thread:1").await.unwrap(), Some("payload".to_string()));
    }

    #[tokio::test]
    async fn memory_store_del_removes_the_key() {
        let store = MemoryStore::new(Duration::from_secs(3600));
        store.set("thread:1", "payload".to_string(), Duration::from_secs(3600)).await.unwrap();
        store.del("thread:1").await.unwrap();
        assert_eq!(store.get("thread:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_key_is_none_not_an_error() {
        let store = MemoryStore::new(Duration::from_secs(3600));
        assert_eq!(store.get("thread:missing").await.unwrap(), None);
    }
}
