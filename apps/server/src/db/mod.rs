//! Database layer - record stores and connection setup

pub mod memory;
pub mod store;
pub mod traits;

pub use memory::InMemoryRecordStore;
pub use store::PostgresRecordStore;
pub use traits::RecordStore;

use crate::config::DatabaseConfig;
use anyhow::Context;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Open a connection pool sized from `config`.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.pool_max_size)
        .min_connections(config.pool_min_size)
        .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
        .connect(&config.url)
        .await
        .context("Failed to connect to database")
}

/// Apply the bundled SQL migrations.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}
