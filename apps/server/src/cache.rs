//! In-memory dataset cache
//!
//! Holds one snapshot of the joined company dataset with a time-based expiry.
//! A read of a valid snapshot does no I/O. A read of a missing or expired
//! snapshot refreshes it from the [`RecordStore`] before returning.
//!
//! Refreshes are single-flight: concurrent misses queue on `refresh_lock`, and
//! every caller after the first re-checks the entry before fetching, so only
//! one store fetch runs per expiry. A failed fetch is returned as
//! [`Error::DataUnavailable`]; an expired snapshot is never served as a
//! fallback.

use crate::db::RecordStore;
use crate::metrics;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tally_query::Record;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

/// Shared, immutable view of one dataset snapshot.
pub type Dataset = Arc<Vec<Record>>;

#[derive(Debug)]
struct CacheEntry {
    dataset: Dataset,
    populated_at: Instant,
    refreshed_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_valid(&self, ttl: Duration) -> bool {
        self.populated_at.elapsed() < ttl
    }
}

/// Snapshot description returned by [`DatasetCache::status`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatus {
    pub populated: bool,
    pub valid: bool,
    pub records: usize,
    pub age_seconds: Option<f64>,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub ttl_seconds: u64,
}

pub struct DatasetCache {
    store: Arc<dyn RecordStore>,
    ttl: Duration,
    entry: RwLock<Option<Arc<CacheEntry>>>,
    refresh_lock: Mutex<()>,
}

impl DatasetCache {
    pub fn new(store: Arc<dyn RecordStore>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            entry: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Return the current dataset, refreshing it first if it is missing or expired.
    pub async fn get_dataset(&self) -> Result<Dataset> {
        if let Some(dataset) = self.valid_dataset().await {
            metrics::CACHE_HITS_TOTAL.inc();
            return Ok(dataset);
        }
        metrics::CACHE_MISSES_TOTAL.inc();

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        if let Some(dataset) = self.valid_dataset().await {
            tracing::debug!("Dataset refreshed by a concurrent caller");
            return Ok(dataset);
        }

        self.refresh().await
    }

    /// Populate the cache ahead of the first request.
    pub async fn warm(&self) -> Result<()> {
        let dataset = self.get_dataset().await?;
        tracing::info!(records = dataset.len(), "Dataset cache warmed");
        Ok(())
    }

    /// Drop the current snapshot so the next read refreshes.
    ///
    /// Callers already holding a [`Dataset`] keep their snapshot.
    pub async fn invalidate(&self) {
        let previous = self.entry.write().await.take();
        metrics::CACHE_RECORDS.set(0);
        tracing::info!(
            had_entry = previous.is_some(),
            "Dataset cache invalidated"
        );
    }

    pub async fn status(&self) -> CacheStatus {
        let entry = self.entry.read().await.clone();
        match entry {
            Some(entry) => CacheStatus {
                populated: true,
                valid: entry.is_valid(self.ttl),
                records: entry.dataset.len(),
                age_seconds: Some(entry.populated_at.elapsed().as_secs_f64()),
                refreshed_at: Some(entry.refreshed_at),
                ttl_seconds: self.ttl.as_secs(),
            },
            None => CacheStatus {
                populated: false,
                valid: false,
                records: 0,
                age_seconds: None,
                refreshed_at: None,
                ttl_seconds: self.ttl.as_secs(),
            },
        }
    }

    async fn valid_dataset(&self) -> Option<Dataset> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|entry| entry.is_valid(self.ttl))
            .map(|entry| Arc::clone(&entry.dataset))
    }

    // Caller must hold `refresh_lock`.
    async fn refresh(&self) -> Result<Dataset> {
        let start = Instant::now();
        let fetched = self.store.fetch_all_joined_records().await;
        let elapsed = start.elapsed();
        metrics::CACHE_REFRESH_DURATION_SECONDS.observe(elapsed.as_secs_f64());

        let records = match fetched {
            Ok(records) => records,
            Err(e) => {
                metrics::CACHE_REFRESH_FAILURES_TOTAL.inc();
                tracing::warn!(
                    backend = self.store.backend_name(),
                    error = %e,
                    "Dataset refresh failed"
                );
                return Err(Error::DataUnavailable(e.to_string()));
            }
        };

        let dataset: Dataset = Arc::new(records);
        let entry = Arc::new(CacheEntry {
            dataset: Arc::clone(&dataset),
            populated_at: Instant::now(),
            refreshed_at: Utc::now(),
        });
        *self.entry.write().await = Some(entry);

        metrics::CACHE_REFRESHES_TOTAL.inc();
        metrics::CACHE_RECORDS.set(dataset.len() as i64);
        tracing::info!(
            backend = self.store.backend_name(),
            records = dataset.len(),
            duration_ms = elapsed.as_millis() as u64,
            "Dataset refreshed"
        );

        Ok(dataset)
    }
}
