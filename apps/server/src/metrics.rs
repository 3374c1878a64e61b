//! Prometheus metrics for the tally server

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter, register_int_counter_vec,
    register_int_gauge, Histogram, HistogramVec, IntCounter, IntCounterVec, IntGauge,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "tally_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "tally_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    // Dataset Cache Metrics

    pub static ref CACHE_HITS_TOTAL: IntCounter = register_int_counter!(
        "tally_cache_hits_total",
        "Dataset reads served from a valid cache entry"
    )
    .expect("Failed to register CACHE_HITS_TOTAL");

    pub static ref CACHE_MISSES_TOTAL: IntCounter = register_int_counter!(
        "tally_cache_misses_total",
        "Dataset reads that found no valid cache entry"
    )
    .expect("Failed to register CACHE_MISSES_TOTAL");

    pub static ref CACHE_REFRESHES_TOTAL: IntCounter = register_int_counter!(
        "tally_cache_refreshes_total",
        "Successful dataset refreshes from the record store"
    )
    .expect("Failed to register CACHE_REFRESHES_TOTAL");

    pub static ref CACHE_REFRESH_FAILURES_TOTAL: IntCounter = register_int_counter!(
        "tally_cache_refresh_failures_total",
        "Dataset refreshes that failed to read the record store"
    )
    .expect("Failed to register CACHE_REFRESH_FAILURES_TOTAL");

    pub static ref CACHE_REFRESH_DURATION_SECONDS: Histogram = register_histogram!(
        "tally_cache_refresh_duration_seconds",
        "Time spent fetching the dataset from the record store",
        vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to register CACHE_REFRESH_DURATION_SECONDS");

    /// Records in the current snapshot
    pub static ref CACHE_RECORDS: IntGauge = register_int_gauge!(
        "tally_cache_records",
        "Number of records in the cached dataset"
    )
    .expect("Failed to register CACHE_RECORDS");

    // Search Metrics

    pub static ref SEARCH_RESULTS: HistogramVec = register_histogram_vec!(
        "tally_search_results",
        "Number of records returned by a search",
        &["algorithm"],
        vec![0.0, 1.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0]
    )
    .expect("Failed to register SEARCH_RESULTS");
}

/// Collapse request paths to a bounded label set.
pub fn sanitize_path(path: &str) -> String {
    match path {
        "/api/companies/" => "/api/companies".to_string(),
        "/" | "/health" | "/metrics" | "/api/companies" | "/api/companies/_search"
        | "/admin/cache" | "/admin/cache/invalidate" => path.to_string(),
        _ => "other".to_string(),
    }
}
