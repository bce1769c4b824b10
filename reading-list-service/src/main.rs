use reading_list_service::config::{BackendType, Config};
use reading_list_service::models::storage::{
    CacheStore, FileBackend, MemoryBackend, PostgresBackend, RedisBackend,
};
use reading_list_service::routes::router;
use reading_list_service::services::cache::{ResultCache, Store};
use reading_list_service::services::catalog::OpenLibraryClient;
use reading_list_service::services::loader::load;
use reading_list_service::state::{AppContext, SharedContext};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn connect_store(config: &Config) -> Result<Store, Box<dyn std::error::Error>> {
    let store: Store = match config.backend_type {
        BackendType::Postgres => {
            info!("Using PostgreSQL cache backend");
            Arc::new(PostgresBackend::new(&config.database_url).await?)
        }
        BackendType::Redis => {
            info!("Using Redis cache backend");
            Arc::new(RedisBackend::new(&config.redis_url)?)
        }
        BackendType::Memory => {
            info!("Using in-memory cache backend");
            Arc::new(MemoryBackend::new())
        }
        BackendType::File => {
            info!("Using file cache backend in {}", config.cache_dir);
            Arc::new(FileBackend::new(&config.cache_dir)?)
        }
    };

    store.test_connection().await?;
    Ok(store)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reading_list_service=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    let store = match connect_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to connect to cache backend: {}", e);
            std::process::exit(1);
        }
    };
    info!("Cache backend connection successful");

    let catalog = OpenLibraryClient::new(&config.catalog_base_url, &config.reading_list_user);
    let ctx: SharedContext = Arc::new(AppContext::new(
        Arc::new(catalog),
        ResultCache::new(store),
        config.default_page_size,
    ));

    let loader_ctx = ctx.clone();
    tokio::spawn(async move {
        load(&loader_ctx).await;
    });

    let app = router(ctx);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Reading list service starting on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
