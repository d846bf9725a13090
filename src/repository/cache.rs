//! Response cache stores
//!
//! The gateway caches raw ILS response bodies keyed by request path. Any
//! store that can read, write with a TTL and delete by key will do; a
//! Redis store is used in deployment and a bounded in-process cache otherwise.

use async_trait::async_trait;
use moka::Expiry;
use redis::{aio::ConnectionManager, AsyncCommands};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::GatewayError;

/// Key/value store with per-entry expiration
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, GatewayError>;

    async fn write(&self, key: &str, value: &str, ttl: Duration) -> Result<(), GatewayError>;

    async fn delete(&self, key: &str) -> Result<(), GatewayError>;

    /// Connectivity check used by the readiness endpoint
    async fn ping(&self) -> Result<(), GatewayError> {
        Ok(())
    }
}

/// Cached body with the expiration it was written with
#[derive(Clone)]
struct StoredBody {
    body: String,
    ttl: Duration,
}

/// Per-entry expiration taken from the write
struct WriteTtl;

impl Expiry<String, StoredBody> for WriteTtl {
    fn expire_after_create(&self, _key: &String, value: &StoredBody, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredBody,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process store, bounded by entry count
pub struct MemoryCache {
    entries: moka::future::Cache<String, StoredBody>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::with_capacity(10_000)
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_entries: u64) -> Self {
        let entries = moka::future::Cache::builder()
            .max_capacity(max_entries)
            .expire_after(WriteTtl)
            .build();
        Self { entries }
    }

    /// Live entries, after pending evictions have run
    pub async fn len(&self) -> usize {
        self.entries.run_pending_tasks().await;
        self.entries.iter().count()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn read(&self, key: &str) -> Result<Option<String>, GatewayError> {
        Ok(self.entries.get(key).await.map(|stored| stored.body))
    }

    async fn write(&self, key: &str, value: &str, ttl: Duration) -> Result<(), GatewayError> {
        let stored = StoredBody {
            body: value.to_string(),
            ttl,
        };
        self.entries.insert(key.to_string(), stored).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), GatewayError> {
        self.entries.invalidate(key).await;
        Ok(())
    }
}

/// Redis-backed store sharing one multiplexed connection
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("connection", &"ConnectionManager")
            .finish()
    }
}

impl RedisCache {
    pub async fn new(url: &str) -> Result<Self, GatewayError> {
        info!("Connecting to Redis cache at {}", url);

        let client = redis::Client::open(url)
            .map_err(|e| GatewayError::Cache(format!("Failed to create Redis client: {}", e)))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| GatewayError::Cache(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn read(&self, key: &str) -> Result<Option<String>, GatewayError> {
        let mut conn = self.conn.clone();
        conn.get(key)
            .await
            .map_err(|e| GatewayError::Cache(format!("Redis GET failed: {}", e)))
    }

    async fn write(&self, key: &str, value: &str, ttl: Duration) -> Result<(), GatewayError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
            .await
            .map_err(|e| GatewayError::Cache(format!("Redis SETEX failed: {}", e)))
    }

    async fn delete(&self, key: &str) -> Result<(), GatewayError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| GatewayError::Cache(format!("Redis DEL failed: {}", e)))
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| GatewayError::Cache(format!("Redis connection test failed: {}", e)))
    }
}

/// Namespaced fetch-or-compute front for a [`CacheStore`].
///
/// Store failures are logged and treated as misses; they never fail a request.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
    namespace: String,
}

impl Cache {
    pub fn new(store: Arc<dyn CacheStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    /// Return the cached value, or compute, store and return it
    pub async fn fetch<F, Fut>(&self, key: &str, ttl: Duration, compute: F) -> Result<String, GatewayError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, GatewayError>>,
    {
        let stored_key = self.namespaced(key);
        match self.store.read(&stored_key).await {
            Ok(Some(value)) => {
                debug!("Cache HIT: {}", stored_key);
                return Ok(value);
            }
            Ok(None) => debug!("Cache MISS: {}", stored_key),
            Err(e) => warn!("Cache read failed for {}: {}", stored_key, e),
        }

        let value = compute().await?;

        if let Err(e) = self.store.write(&stored_key, &value, ttl).await {
            warn!("Cache write failed for {}: {}", stored_key, e);
        } else {
            debug!("Cache SET: {} (TTL: {:?})", stored_key, ttl);
        }
        Ok(value)
    }

    pub async fn discard(&self, key: &str) {
        let stored_key = self.namespaced(key);
        match self.store.delete(&stored_key).await {
            Ok(()) => debug!("Cache DISCARD: {}", stored_key),
            Err(e) => warn!("Cache discard failed for {}: {}", stored_key, e),
        }
    }

    pub async fn ping(&self) -> Result<(), GatewayError> {
        self.store.ping().await
    }
}
