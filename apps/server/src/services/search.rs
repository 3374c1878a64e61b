//! Search service - filter and sort over the cached dataset
//!
//! Orchestrates one search by:
//! - reading the dataset snapshot from the cache
//! - parsing the search text into clauses
//! - filtering, then sorting when a sort field is given
//!
//! The cached snapshot is never modified. Results are copies of the matching
//! rows.

use crate::{cache::DatasetCache, metrics, Result};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tally_query::{filter, parser, sort, Record, SortAlgorithm, SortDirection};

/// Structured search request from the transport layer
///
/// Query-string callers may use `search` and `sort_by` instead of
/// `search_text` and `sort_field`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchRequest {
    #[serde(default, alias = "search")]
    pub search_text: String,
    #[serde(default, alias = "sort_by")]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
    #[serde(default)]
    pub algorithm: Option<String>,
}

impl SearchRequest {
    pub fn new(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = Some(order.into());
        self
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    fn sort_field(&self) -> Option<&str> {
        self.sort_field
            .as_deref()
            .map(str::trim)
            .filter(|field| !field.is_empty())
    }
}

/// Search service coordinates dataset searches
pub struct SearchService {
    cache: Arc<DatasetCache>,
}

impl SearchService {
    pub fn new(cache: Arc<DatasetCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<DatasetCache> {
        &self.cache
    }

    /// Run a search and return the matching rows in result order.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Record>> {
        let dataset = self.cache.get_dataset().await?;
        let start = Instant::now();

        let clauses = parser::parse(&request.search_text);
        let matched = filter::apply(&dataset, &clauses);

        let (ordered, algorithm_label, direction_label) = match request.sort_field() {
            Some(field) => {
                let direction = SortDirection::from_order(request.sort_order.as_deref());
                let algorithm = SortAlgorithm::from_name(request.algorithm.as_deref());
                (
                    sort::sort(&matched, field, direction, algorithm),
                    algorithm.as_str(),
                    direction.as_str(),
                )
            }
            None => (matched, "none", "none"),
        };

        let results: Vec<Record> = ordered.into_iter().cloned().collect();

        metrics::SEARCH_RESULTS
            .with_label_values(&[algorithm_label])
            .observe(results.len() as f64);
        tracing::debug!(
            clauses = clauses.len(),
            dataset = dataset.len(),
            results = results.len(),
            sort_field = request.sort_field().unwrap_or(""),
            algorithm = algorithm_label,
            direction = direction_label,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Search completed"
        );

        Ok(results)
    }
}
