//! Holdings Engine server
//!
//! REST front for ILS holdings and availability.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use holdings_engine::{
    api,
    config::AppConfig,
    repository::{Cache, CacheStore, HttpTransport, IlsGateway, MemoryCache, RedisCache, SshProxyTransport, Transport, TtlPolicy},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("holdings_engine={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Holdings Engine v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn CacheStore> = match &config.cache.redis_url {
        Some(url) => Arc::new(RedisCache::new(url).await.context("Failed to connect to Redis")?),
        None => {
            tracing::info!("No Redis URL configured, caching ILS responses in memory");
            Arc::new(MemoryCache::with_capacity(config.cache.memory_capacity))
        }
    };

    let transport: Arc<dyn Transport> = match &config.ils.proxy_host {
        Some(host) => {
            tracing::info!("Proxying ILS requests through {}", host);
            Arc::new(SshProxyTransport::new(host.clone(), config.ils.proxy_user.clone(), config.ils.timeout()))
        }
        None => Arc::new(HttpTransport::new(config.ils.timeout()).context("Failed to build HTTP client")?),
    };

    let gateway = IlsGateway::new(
        config.ils.base_url.clone(),
        transport,
        Cache::new(store, config.cache.namespace.clone()),
        TtlPolicy::from(&config.cache),
    );
    tracing::info!("ILS gateway ready at {}", config.ils.base_url);

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(gateway)),
    };
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
