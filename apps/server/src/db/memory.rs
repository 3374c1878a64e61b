//! In-memory implementation of RecordStore
//!
//! Serves a fixed dataset. Used by tests and by local runs configured with
//! `database.url = "memory://"`.

use crate::db::traits::RecordStore;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tally_query::Record;

#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    records: RwLock<Vec<Record>>,
    fetches: AtomicUsize,
    failing: AtomicBool,
    latency: RwLock<Option<Duration>>,
}

impl InMemoryRecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            inner: Arc::new(Inner {
                records: RwLock::new(records),
                ..Inner::default()
            }),
        }
    }

    /// Replace the stored rows. The cache only sees them after its next refresh.
    pub fn replace(&self, records: Vec<Record>) {
        if let Ok(mut guard) = self.inner.records.write() {
            *guard = records;
        }
    }

    /// Number of completed or in-progress fetches.
    pub fn fetch_count(&self) -> usize {
        self.inner.fetches.load(Ordering::SeqCst)
    }

    /// Make subsequent fetches fail, simulating an unreachable database.
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Delay every fetch by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        if let Ok(mut guard) = self.inner.latency.write() {
            *guard = latency;
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch_all_joined_records(&self) -> Result<Vec<Record>> {
        self.inner.fetches.fetch_add(1, Ordering::SeqCst);

        let latency = self.inner.latency.read().ok().and_then(|guard| *guard);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(Error::Internal("in-memory store set to fail".to_string()));
        }

        self.inner
            .records
            .read()
            .map(|records| records.clone())
            .map_err(|_| Error::Internal("in-memory store lock poisoned".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
