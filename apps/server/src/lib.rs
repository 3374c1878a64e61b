//! Tally server
//!
//! HTTP service for ad-hoc search over a company dataset:
//! - Dataset cache with TTL expiry and single-flight refresh
//! - Postgres or in-memory record stores
//! - Filter and sort through the `tally-query` core
//! - Prometheus metrics and structured logging

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
