//! Core trait for dataset storage backends

use crate::Result;
use async_trait::async_trait;
use tally_query::Record;

/// Durable source of the joined company dataset
///
/// Any backend that can produce the flattened rows (Postgres, in-memory
/// fixtures, a remote API) can implement this trait. The dataset cache is the
/// only caller.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every company joined with its details and financial years.
    ///
    /// Returns one record per (company, financial year). A company without
    /// financial data still yields one record with null financial fields.
    /// An empty store returns an empty vector, not an error.
    async fn fetch_all_joined_records(&self) -> Result<Vec<Record>>;

    /// Short backend name used in logs.
    fn backend_name(&self) -> &'static str;
}
