//! Shared application state

use crate::{
    cache::DatasetCache,
    config::Config,
    db::{self, InMemoryRecordStore, PostgresRecordStore, RecordStore},
    services::SearchService,
};
use anyhow::Context;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<DatasetCache>,
    pub search_service: Arc<SearchService>,
    /// Present when the Postgres store is in use.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// Build state from configuration, connecting to the configured store.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        if config.database.is_memory() {
            tracing::warn!("Using the in-memory record store; the dataset starts empty");
            let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::default());
            return Self::with_store(config, store, None).await;
        }

        let pool = db::connect(&config.database).await?;
        if config.database.run_migrations {
            db::run_migrations(&pool).await?;
        }

        let store: Arc<dyn RecordStore> = Arc::new(PostgresRecordStore::new(pool.clone()));
        Self::with_store(config, store, Some(pool)).await
    }

    /// Build state over an existing record store.
    pub async fn with_store(
        config: Config,
        store: Arc<dyn RecordStore>,
        db_pool: Option<PgPool>,
    ) -> anyhow::Result<Self> {
        config.validate().context("Invalid configuration")?;

        let cache = Arc::new(DatasetCache::new(store, config.cache.ttl()));

        // A cold start is recoverable: the first request retries the fetch.
        if config.cache.warm_on_startup {
            if let Err(e) = cache.warm().await {
                tracing::warn!(error = %e, "Dataset cache warm-up failed; will load on first request");
            }
        }

        let search_service = Arc::new(SearchService::new(Arc::clone(&cache)));

        Ok(Self {
            config: Arc::new(config),
            cache,
            search_service,
            db_pool,
        })
    }
}
