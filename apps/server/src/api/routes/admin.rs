//! Operator routes for the dataset cache

use crate::api::handlers::admin;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/cache", get(admin::cache_status))
        .route("/cache/invalidate", post(admin::invalidate_cache))
}
