//! Access to the ILS: transports, response cache and the cached gateway

pub mod cache;
pub mod gateway;
pub mod transport;

pub use cache::{Cache, CacheStore, MemoryCache, RedisCache};
pub use gateway::{CacheOptions, IlsGateway, TtlPolicy};
pub use transport::{HttpReply, HttpTransport, SshProxyTransport, Transport};
