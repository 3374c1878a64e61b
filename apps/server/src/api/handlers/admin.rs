//! Dataset cache administration

use crate::{cache::CacheStatus, state::AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// GET /admin/cache
pub async fn cache_status(State(state): State<AppState>) -> Json<CacheStatus> {
    Json(state.cache.status().await)
}

/// POST /admin/cache/invalidate
///
/// Drops the snapshot; the next search reloads from the record store.
pub async fn invalidate_cache(State(state): State<AppState>) -> Json<Value> {
    state.cache.invalidate().await;
    Json(json!({
        "invalidated": true,
        "cache": state.cache.status().await,
    }))
}
