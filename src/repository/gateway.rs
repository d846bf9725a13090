//! Cached ILS gateway
//!
//! GET responses are cached under their request path (the URL with the
//! base stripped, e.g. `/items/2470431`). The expiration depends on the
//! action, the first path segment: user lookups go stale quickly,
//! reference lists barely change. POSTs are never cached.

use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheConfig;
use crate::error::{AppError, AppResult, GatewayError};
use crate::firehose::MappingError;

use super::cache::Cache;
use super::transport::{HttpReply, Transport};

/// Per-call cache behavior
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// Overrides the action-derived expiration
    pub expires_in: Option<Duration>,
    /// Drop any cached entry before fetching
    pub force: bool,
}

impl CacheOptions {
    pub fn refresh() -> Self {
        Self {
            force: true,
            ..Self::default()
        }
    }
}

/// Expiration by action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlPolicy {
    pub fast: Duration,
    pub user: Duration,
    pub list: Duration,
}

impl TtlPolicy {
    pub fn for_path(&self, path: &str) -> Duration {
        match path.split('/').nth(1) {
            Some("users") => self.user,
            Some("list") => self.list,
            _ => self.fast,
        }
    }
}

impl From<&CacheConfig> for TtlPolicy {
    fn from(config: &CacheConfig) -> Self {
        Self {
            fast: config.fast_ttl(),
            user: config.user_ttl(),
            list: config.list_ttl(),
        }
    }
}

#[derive(Clone)]
pub struct IlsGateway {
    base_url: String,
    transport: Arc<dyn Transport>,
    cache: Cache,
    ttl: TtlPolicy,
}

impl IlsGateway {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>, cache: Cache, ttl: TtlPolicy) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            cache,
            ttl,
        }
    }

    /// Request path for a list of segments; also the cache key
    pub fn path(segments: &[&str]) -> String {
        format!("/{}", segments.join("/"))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn expiration(&self, path: &str, options: &CacheOptions) -> Duration {
        options.expires_in.unwrap_or_else(|| self.ttl.for_path(path))
    }

    /// Cached GET returning the response body.
    ///
    /// Non-success statuses are errors and are not cached.
    pub async fn get(&self, segments: &[&str], options: &CacheOptions) -> Result<String, GatewayError> {
        let path = Self::path(segments);
        if options.force {
            self.cache.discard(&path).await;
        }

        let ttl = self.expiration(&path, options);
        let url = self.url(&path);
        let transport = self.transport.clone();
        self.cache
            .fetch(&path, ttl, || async move {
                tracing::debug!("ILS GET {}", url);
                let reply = transport.get(&url).await?;
                if !(200..300).contains(&reply.status) {
                    return Err(GatewayError::Status {
                        status: reply.status,
                        path: url,
                    });
                }
                Ok(reply.body)
            })
            .await
    }

    /// Uncached POST; the reply is returned whatever its status
    pub async fn post(&self, segments: &[&str], form: &[(String, String)]) -> Result<HttpReply, GatewayError> {
        let url = self.url(&Self::path(segments));
        tracing::debug!("ILS POST {}", url);
        self.transport.post(&url, form).await
    }

    /// Evict the cached response for this path
    pub async fn discard(&self, segments: &[&str]) {
        self.cache.discard(&Self::path(segments)).await;
    }

    /// GET and decode; the cache entry is discarded on any failure
    pub async fn fetch_decoded<T>(
        &self,
        segments: &[&str],
        options: &CacheOptions,
        decode: fn(&str) -> Result<T, MappingError>,
    ) -> AppResult<T> {
        let body = match self.get(segments, options).await {
            Ok(body) => body,
            Err(e) => {
                self.discard(segments).await;
                return Err(AppError::Ils(e));
            }
        };
        match decode(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(
                    "Unreadable ILS response for {} ({}): {}",
                    Self::path(segments),
                    crate::firehose::describe_body(Some(&body)),
                    e
                );
                self.discard(segments).await;
                Err(AppError::Mapping(e))
            }
        }
    }
}
