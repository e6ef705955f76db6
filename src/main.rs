use std::future::IntoFuture;
use std::sync::Arc;

use caregrid::catalog::TABLES;
use caregrid::{build_router, AppConfig, AppError, AppResult, AppState, PgStore, RecordStore, PLATFORM_SCHEMA};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config)?;

    tracing::info!(database_url = %config.masked_database_url(), "connecting to database");
    let store = PgStore::connect(&config.database_url, config.max_connections).await?;
    store.ping().await?;
    store.bootstrap(PLATFORM_SCHEMA).await?;
    tracing::info!("database connection successful and tables created");

    let store: Arc<dyn RecordStore> = Arc::new(store);
    let state = AppState::new(Arc::clone(&store), &config, TABLES)?;
    let app = build_router(state);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    let server = axum::serve(listener, app).into_future();
    tokio::select! {
        result = server => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    store.close().await;
    tracing::info!("store closed");
    Ok(())
}

fn init_logging(config: &AppConfig) -> AppResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("caregrid=debug,tower_http=debug,info"));
    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    result.map_err(|e| AppError::Internal(format!("failed to init subscriber: {e}")))
}
